// ============================================================================
// DASHBOARD VIEW - Destino tras el login
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{on_click, ElementBuilder, EventListener};
use crate::state::AuthState;
use crate::utils::LABEL_LOG_OUT;

pub struct DashboardPage {
    _logout: EventListener,
}

impl DashboardPage {
    pub fn mount(root: &Element, auth: &AuthState) -> Result<Self, JsValue> {
        let session = auth.session();
        let email = session.as_ref().map(|s| s.email.as_str()).unwrap_or("");

        let logout = ElementBuilder::new("button")
            .class("logout-button")
            .attr("type", "button")
            .text(LABEL_LOG_OUT)
            .build()?;

        let mut card = ElementBuilder::new("div")
            .class("dashboard-card")
            .nested(ElementBuilder::new("h1").text("dashboard"))
            .nested(
                ElementBuilder::new("p")
                    .class("dashboard-user")
                    .text(&format!("signed in as {}", email)),
            );

        if let Some(expires_at) = session.as_ref().and_then(|s| s.expires_at) {
            let local = expires_at.with_timezone(&chrono::Local);
            card = card.nested(
                ElementBuilder::new("p")
                    .class("dashboard-expiry")
                    .text(&format!("session valid until {}", local.format("%H:%M"))),
            );
        }

        let page = ElementBuilder::new("div")
            .class("dashboard-page")
            .nested(card.child(&logout))
            .build()?;
        root.append_child(&page)?;

        let auth = auth.clone();
        let logout = on_click(&logout, move || {
            log::info!("👋 [AUTH] Logout solicitado");
            auth.logout();
        })?;

        Ok(Self { _logout: logout })
    }
}
