use crate::fcpxml::element::Element;

// @module: Document rendering

/// Fixed two-line declaration FCP expects at the top of the file. The
/// tree renderer emits no declaration of its own, so this appears
/// exactly once.
pub const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" ?>\n<!DOCTYPE fcpxml>\n\n";

/// Render the document tree to the final UTF-8 text, declaration
/// included.
pub fn serialize(root: &Element) -> String {
    let mut out = String::from(XML_DECLARATION);
    root.render(&mut out, 0);
    out
}
