/*!
 * FCPXML document construction.
 *
 * - `element`: plain owned XML element tree
 * - `builder`: turns subtitle entries plus a render config into the
 *   full fcpxml document tree
 * - `serializer`: renders the tree with the fixed two-line declaration
 */

pub mod builder;
pub mod element;
pub mod serializer;

pub use builder::FcpXmlBuilder;
pub use element::Element;
pub use serializer::serialize;
