//! Image binding.
//!
//! An image binding addresses a `draw:frame` by its `draw:name` attribute.
//! The frame's embedded `draw:image` child is patched to point at a staged
//! payload path under `Pictures/`, the manifest gains a matching file
//! entry, and the raw bytes are staged as a new archive entry. The binder
//! patches existing structure only; a frame without an embedded reference
//! is a template defect.

use crate::common::{BindingKind, Error, Result};
use crate::odt::archive::StagedFile;
use crate::odt::constants::{
    ATTR_DRAW_NAME, ATTR_FULL_PATH, ATTR_MEDIA_TYPE, ATTR_XLINK_HREF, IMAGE_EXT,
    IMAGE_MEDIA_TYPE, PICTURES_DIR, TAG_FILE_ENTRY, TAG_FRAME, TAG_MANIFEST,
};
use crate::odt::element::{Element, Node};
use log::debug;
use std::collections::{HashMap, HashSet};

/// Bind every image to its drawing frame, registering manifest entries and
/// staging the payload bytes.
pub(crate) fn bind_images(
    content: &mut Element,
    manifest: &mut Element,
    images: &HashMap<String, Vec<u8>>,
    staged: &mut Vec<StagedFile>,
) -> Result<()> {
    if images.is_empty() {
        return Ok(());
    }

    let manifest_root = manifest.find_first_mut(TAG_MANIFEST).ok_or_else(|| {
        Error::MalformedTemplate(format!("manifest has no {TAG_MANIFEST} element"))
    })?;

    let mut remaining: HashSet<String> = images.keys().cloned().collect();
    content.for_each_element_mut(TAG_FRAME, &mut |frame| {
        let name = match frame.get_attribute(ATTR_DRAW_NAME) {
            Some(name) => name.to_string(),
            None => return Ok(()),
        };
        let Some(bytes) = images.get(&name) else {
            return Ok(());
        };

        let image = frame.first_child_element_mut().ok_or_else(|| {
            Error::MalformedTemplate(format!("image frame {name} has no embedded reference"))
        })?;
        if image.get_attribute(ATTR_XLINK_HREF).is_none() {
            return Err(Error::MalformedTemplate(format!(
                "image frame {name} has no {ATTR_XLINK_HREF} reference"
            )));
        }

        let path = format!("{PICTURES_DIR}/{name}.{IMAGE_EXT}");
        image.set_attribute(ATTR_XLINK_HREF, &path);

        // First frame with the name wins the manifest entry and the payload;
        // later frames still get their reference patched.
        if remaining.remove(&name) {
            debug!("staging image {name} at {path}");
            let mut entry = Element::new(TAG_FILE_ENTRY);
            entry.set_attribute(ATTR_FULL_PATH, &path);
            entry.set_attribute(ATTR_MEDIA_TYPE, IMAGE_MEDIA_TYPE);
            manifest_root.add_child(Node::Element(entry));
            staged.push(StagedFile {
                path,
                bytes: bytes.clone(),
            });
        }
        Ok(())
    })?;

    if let Some(name) = remaining.into_iter().next() {
        return Err(Error::UnmatchedBinding {
            kind: BindingKind::Image,
            name,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content() -> Element {
        Element::from_bytes(
            b"<office:text>\
              <draw:frame draw:name=\"Image1\">\
              <draw:image xlink:href=\"Pictures/placeholder.png\"/>\
              </draw:frame>\
              </office:text>",
        )
        .unwrap()
    }

    fn manifest() -> Element {
        Element::from_bytes(
            b"<manifest:manifest>\
              <manifest:file-entry manifest:full-path=\"/\" \
              manifest:media-type=\"application/vnd.oasis.opendocument.text\"/>\
              </manifest:manifest>",
        )
        .unwrap()
    }

    fn images(pairs: &[(&str, &[u8])]) -> HashMap<String, Vec<u8>> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_vec()))
            .collect()
    }

    #[test]
    fn test_rewrites_the_frame_reference() {
        let mut content = content();
        let mut manifest = manifest();
        let mut staged = Vec::new();
        bind_images(
            &mut content,
            &mut manifest,
            &images(&[("Image1", b"\x89PNG")]),
            &mut staged,
        )
        .unwrap();

        let image = content.elements_by_tag(TAG_FRAME)[0]
            .first_child_element()
            .unwrap();
        assert_eq!(
            image.get_attribute(ATTR_XLINK_HREF),
            Some("Pictures/Image1.png")
        );
    }

    #[test]
    fn test_registers_a_manifest_entry() {
        let mut content = content();
        let mut manifest = manifest();
        let mut staged = Vec::new();
        bind_images(
            &mut content,
            &mut manifest,
            &images(&[("Image1", b"\x89PNG")]),
            &mut staged,
        )
        .unwrap();

        let entry = manifest
            .elements_by_tag(TAG_FILE_ENTRY)
            .into_iter()
            .find(|e| e.get_attribute(ATTR_FULL_PATH) == Some("Pictures/Image1.png"))
            .expect("manifest entry registered");
        assert_eq!(entry.get_attribute(ATTR_MEDIA_TYPE), Some(IMAGE_MEDIA_TYPE));
    }

    #[test]
    fn test_stages_the_payload_bytes() {
        let mut content = content();
        let mut manifest = manifest();
        let mut staged = Vec::new();
        bind_images(
            &mut content,
            &mut manifest,
            &images(&[("Image1", b"\x89PNG")]),
            &mut staged,
        )
        .unwrap();

        assert_eq!(staged.len(), 1);
        assert_eq!(staged[0].path, "Pictures/Image1.png");
        assert_eq!(staged[0].bytes, b"\x89PNG");
    }

    #[test]
    fn test_unmatched_binding_names_the_key() {
        let mut content = content();
        let mut manifest = manifest();
        let mut staged = Vec::new();
        let err = bind_images(
            &mut content,
            &mut manifest,
            &images(&[("Anything", b"")]),
            &mut staged,
        )
        .unwrap_err();

        match err {
            Error::UnmatchedBinding { kind, name } => {
                assert_eq!(kind, BindingKind::Image);
                assert_eq!(name, "Anything");
            },
            other => panic!("unexpected error: {other}"),
        }
        assert!(staged.is_empty());
    }

    #[test]
    fn test_frame_without_reference_is_a_template_defect() {
        let mut content =
            Element::from_bytes(b"<office:text><draw:frame draw:name=\"Image1\"><draw:image/></draw:frame></office:text>")
                .unwrap();
        let mut manifest = manifest();
        let mut staged = Vec::new();
        let err = bind_images(
            &mut content,
            &mut manifest,
            &images(&[("Image1", b"")]),
            &mut staged,
        )
        .unwrap_err();

        assert!(matches!(err, Error::MalformedTemplate(_)));
    }
}
