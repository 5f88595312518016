use draftform_core::traits::Sanitizer;

///
/// Trim
///

pub struct Trim;

impl Sanitizer<String> for Trim {
    fn sanitize(&self, value: &mut String) {
        let trimmed = value.trim();
        if trimmed.len() != value.len() {
            *value = trimmed.to_owned();
        }
    }
}

///
/// Squeeze
///
/// Collapse internal whitespace runs to single spaces and trim the ends.
///

pub struct Squeeze;

impl Sanitizer<String> for Squeeze {
    fn sanitize(&self, value: &mut String) {
        let squeezed = value.split_whitespace().collect::<Vec<_>>().join(" ");
        if squeezed != *value {
            *value = squeezed;
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn run(sanitizer: &dyn Sanitizer<String>, input: &str) -> String {
        let mut value = input.to_owned();
        sanitizer.sanitize(&mut value);
        value
    }

    #[test]
    fn test_trim() {
        assert_eq!(run(&Trim, "  John Doe  "), "John Doe");
        assert_eq!(run(&Trim, "John Doe"), "John Doe");
        assert_eq!(run(&Trim, "   "), "");
    }

    #[test]
    fn test_squeeze() {
        assert_eq!(run(&Squeeze, "  John    Doe "), "John Doe");
        assert_eq!(run(&Squeeze, "one\t\ttwo\nthree"), "one two three");
        assert_eq!(run(&Squeeze, "clean"), "clean");
    }

    #[test]
    fn test_sanitizers_are_idempotent() {
        for input in ["  a   b  ", "a b", ""] {
            let once = run(&Squeeze, input);
            assert_eq!(run(&Squeeze, &once), once);
        }
    }
}
