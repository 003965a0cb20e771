//! Placeholders for pasted or dropped images that are still uploading.
//!
//! The placeholder is an ordinary image decoration with a unique label and an
//! empty URL. Once the upload finishes it is swapped for the real image and
//! any selection after it moves by the length difference.

use std::fmt;

use gita_core::utf16;

use crate::{
  decorate::{
    DecorateOptions,
    DecorationKind,
    decorate,
  },
  selection::Selection,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPlaceholder {
  text: String,
}

impl UploadPlaceholder {
  /// `id` must be unique among the uploads pending in one document.
  pub fn new(id: impl fmt::Display) -> Self {
    Self {
      text: image(&format!("Uploading_{id}"), ""),
    }
  }

  #[inline]
  pub fn text(&self) -> &str {
    &self.text
  }

  /// Replaces the first occurrence of the placeholder in `text`.
  ///
  /// Returns `None` when the placeholder is gone, e.g. because the user
  /// deleted it while the upload was running.
  pub fn resolve(
    &self,
    text: &str,
    selection: Selection,
    file_name: &str,
    url: &str,
  ) -> Option<(String, Selection)> {
    let at = text.find(&self.text)?;
    let uploaded = image(file_name, url);

    let end = utf16::to_utf16_offset(text, at + self.text.len())?;
    let old_len = utf16::len(&self.text);
    let new_len = utf16::len(&uploaded);
    let shift = |pos: usize| {
      if pos >= end {
        pos - old_len + new_len
      } else {
        pos
      }
    };

    let mut resolved = String::with_capacity(text.len() + uploaded.len());
    resolved.push_str(&text[..at]);
    resolved.push_str(&uploaded);
    resolved.push_str(&text[at + self.text.len()..]);

    Some((
      resolved,
      Selection::new(shift(selection.start), shift(selection.end)),
    ))
  }
}

fn image(label: &str, url: &str) -> String {
  let options = DecorateOptions {
    target: Some(label.to_string()),
    image_url: Some(url.to_string()),
    ..Default::default()
  };
  decorate("", DecorationKind::Image, &options).text
}
