use serde::Serialize;

use crate::messages::FlashMessage;


/// A rendered page: the view-specific content plus the flash messages
/// that were pending when the page was rendered.
///
/// The view's fields are flattened into the top-level JSON object.
#[derive(Serialize, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde_impls_for_client_on_models", derive(serde::Deserialize))]
pub struct RenderedView<V> {
    #[serde(flatten)]
    pub view: V,

    pub flashes: Vec<FlashMessage>,
}
