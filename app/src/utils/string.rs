//! see: https://rust-lang.github.io/rfcs/0445-extension-trait-conventions.html

use url::Url;

pub trait StringExt {
    fn pop_if_is(&mut self, c: char) -> bool;
}

impl StringExt for String {
    /// removes the last char of the string if its a specific char,
    ///
    /// returns a bool indicating if a char was removed
    fn pop_if_is(&mut self, c: char) -> bool {
        if self.ends_with(c) {
            self.pop();

            return true;
        }

        false
    }
}

/// percent encodes a value so it can be used as a single URL path segment
///
/// the `.` and `..` segments have no encoded form and are returned as is
pub fn encode_path_segment(segment: &str) -> String {
    let Ok(mut url) = Url::parse("http://localhost/") else {
        return segment.to_owned();
    };

    if let Ok(mut segments) = url.path_segments_mut() {
        segments.clear().push(segment);
    }

    match url.path().strip_prefix('/') {
        Some(encoded) if !encoded.is_empty() => encoded.to_owned(),
        _ => segment.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pop_if_is_only_removes_the_given_char() {
        let mut url = String::from("http://localhost:5173/");

        assert!(url.pop_if_is('/'));
        assert!(!url.pop_if_is('/'));
        assert_eq!(url, "http://localhost:5173");
    }

    #[test]
    fn encode_path_segment_keeps_unreserved_chars() {
        assert_eq!(encode_path_segment("CAR-0001-XYZ"), "CAR-0001-XYZ");
        assert_eq!(encode_path_segment("a.b_c~d"), "a.b_c~d");
    }

    #[test]
    fn encode_path_segment_escapes_reserved_and_multibyte_chars() {
        assert_eq!(encode_path_segment("CAR 1/2"), "CAR%201%2F2");
        assert_eq!(encode_path_segment("pátio"), "p%C3%A1tio");
        assert_eq!(encode_path_segment("CAR#1?x=%"), "CAR%231%3Fx=%25");
    }
}
