//! Scalar field substitution.
//!
//! Placeholders are `text:database-display` elements whose text content is
//! the field name, delimiters included (`<name>`). Every placeholder found
//! in the content document must have a binding; the first one without a
//! match aborts the merge naming its literal text. An unused scalar binding
//! key is not an error, unlike table, image, and chart keys.

use crate::common::{Error, Result};
use crate::odt::constants::TAG_DATABASE_DISPLAY;
use crate::odt::element::Element;
use std::collections::HashMap;

/// Replace every scalar placeholder in the content document with its bound
/// text.
pub(crate) fn substitute_fields(
    content: &mut Element,
    texts: &HashMap<String, String>,
) -> Result<()> {
    content.for_each_element_mut(TAG_DATABASE_DISPLAY, &mut |placeholder| {
        let field = placeholder.text_content();
        match texts.get(&field) {
            Some(value) => {
                placeholder.set_text_content(value);
                Ok(())
            },
            None => Err(Error::MissingField(field)),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content() -> Element {
        Element::from_bytes(
            b"<office:text>\
              <text:p>Dear <text:database-display text:column-name=\"name\">\
              &lt;name&gt;</text:database-display>,</text:p>\
              <text:p><text:database-display text:column-name=\"email\">\
              &lt;email&gt;</text:database-display></text:p>\
              </office:text>",
        )
        .unwrap()
    }

    fn texts(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (format!("<{k}>"), v.to_string()))
            .collect()
    }

    #[test]
    fn test_substitutes_every_placeholder() {
        let mut doc = content();
        substitute_fields(
            &mut doc,
            &texts(&[("name", "John"), ("email", "john@example.com")]),
        )
        .unwrap();

        let rendered = doc.text_content();
        assert!(rendered.contains("Dear John,"));
        assert!(rendered.contains("john@example.com"));
        assert!(!rendered.contains("<name>"));
    }

    #[test]
    fn test_missing_binding_names_the_placeholder() {
        let mut doc = content();
        let err = substitute_fields(&mut doc, &texts(&[("name", "John")])).unwrap_err();

        match err {
            Error::MissingField(field) => assert_eq!(field, "<email>"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unused_scalar_key_is_not_an_error() {
        let mut doc = content();
        substitute_fields(
            &mut doc,
            &texts(&[
                ("name", "John"),
                ("email", "john@example.com"),
                ("unused", "ignored"),
            ]),
        )
        .unwrap();
    }
}
