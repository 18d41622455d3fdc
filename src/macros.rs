#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

#[macro_export]
macro_rules! terms {
    ($text:literal) => {
        $crate::parse_terms($text)
    };
}

#[macro_export]
macro_rules! rule {
    (
        pattern: $pattern:literal,
        responses: [ $($response:literal),+ $(,)? ]
        $(,)?
    ) => {
        $crate::Rule::new($crate::terms!($pattern), vec![ $( $crate::terms!($response) ),+ ])
    };
}
