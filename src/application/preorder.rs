//! Pre-order form submission.

use tracing::{debug, warn};

use crate::application::api::{PreordersApi, RequestFailed};
use crate::application::surface::{PageElement, PreorderSurface};
use crate::domain::preorders::PreorderForm;

pub const SUBMITTING_MESSAGE: &str = "Submitting…";
pub const RECEIVED_MESSAGE: &str = "✅ Pre-order received! We’ll follow up soon.";

pub struct PreorderSubmitter<P> {
    api: P,
}

impl<P: PreordersApi> PreorderSubmitter<P> {
    pub fn new(api: P) -> Self {
        Self { api }
    }

    #[cfg(test)]
    pub(crate) fn api(&self) -> &P {
        &self.api
    }

    /// Submit the form. `Ok(false)` means the page has no pre-order form.
    pub async fn submit<S: PreorderSurface>(
        &self,
        surface: &mut S,
        form: PreorderForm,
    ) -> Result<bool, RequestFailed> {
        if !surface.has(PageElement::PreorderForm) {
            return Ok(false);
        }

        surface.set_preorder_message(SUBMITTING_MESSAGE.to_string());
        let request = form.into_request();

        match self.api.submit_preorder(&request).await {
            Ok(()) => {
                debug!(quantity = request.quantity, "pre-order submitted");
                surface.set_preorder_message(RECEIVED_MESSAGE.to_string());
                surface.reset_preorder_form();
                surface.set_installation_checked(true);
                Ok(true)
            }
            Err(err) => {
                warn!(error = %err, status = ?err.status(), "pre-order submission failed");
                surface.set_preorder_message(format!("❌ {}", err.message()));
                Err(err)
            }
        }
    }
}
