// ============================================================================
// LOGIN VIEW - Pinta el LoginViewModel en el DOM (sin lógica)
// ============================================================================

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::config::CONFIG;
use crate::dom::{
    on_click, on_input, on_submit, set_flag, set_text, toggle_class, ElementBuilder,
    EventListener,
};
use crate::services::{Authenticator, Navigator};
use crate::state::{SessionProvider, Subscription};
use crate::utils::*;
use crate::viewmodels::{LoginScreen, LoginView, LoginViewModel, SubmitOutcome};

/// Elementos que cambian con el estado
#[derive(Clone)]
struct LoginRefs {
    form: Element,
    banner: Element,
    banner_close: Element,
    banner_text: Element,
    email: Element,
    email_error: Element,
    password: Element,
    password_error: Element,
    toggle: Element,
    submit: Element,
    spinner: Element,
    submit_label: Element,
}

/// Pantalla de login montada en el DOM
pub struct LoginPage {
    screen: LoginScreen,
    _listeners: Vec<EventListener>,
    _paint: Subscription,
}

impl LoginPage {
    pub fn mount(
        root: &Element,
        authenticator: Rc<dyn Authenticator>,
        provider: Rc<dyn SessionProvider>,
        navigator: Rc<dyn Navigator>,
    ) -> Result<Self, JsValue> {
        let screen = LoginScreen::mount(
            authenticator,
            provider,
            navigator,
            &CONFIG.authenticated_route,
        );
        let vm = screen.view_model().clone();

        let (page, refs) = build_dom()?;
        root.append_child(&page)?;

        let listeners = vec![
            {
                let vm = vm.clone();
                on_input(&refs.email, move |value| vm.set_email(value))?
            },
            {
                let vm = vm.clone();
                on_input(&refs.password, move |value| vm.set_password(value))?
            },
            {
                let vm = vm.clone();
                on_click(&refs.toggle, move || vm.toggle_password_visibility())?
            },
            {
                let vm = vm.clone();
                on_click(&refs.banner_close, move || vm.dismiss_banner())?
            },
            {
                let vm = vm.clone();
                on_submit(&refs.form, move || submit(&vm))?
            },
        ];

        // Pintar estado inicial (puede traer un aviso de sesión expirada)
        paint(&refs, &vm.view())?;

        let paint_sub = {
            let vm_paint = vm.clone();
            vm.subscribe(move || {
                if let Err(e) = paint(&refs, &vm_paint.view()) {
                    log::error!("❌ [LOGIN] Error pintando formulario: {:?}", e);
                }
            })
        };

        Ok(Self {
            screen,
            _listeners: listeners,
            _paint: paint_sub,
        })
    }
}

fn submit(vm: &LoginViewModel) {
    match vm.submit() {
        SubmitOutcome::Pending(pending) => spawn_local(pending),
        SubmitOutcome::Invalid => log::info!("✋ [LOGIN] Formulario con errores"),
        SubmitOutcome::Ignored => {}
    }
}

fn build_dom() -> Result<(Element, LoginRefs), JsValue> {
    let header = ElementBuilder::new("div")
        .class("login-header")
        .nested(ElementBuilder::new("div").class("login-icon").text("🔐"))
        .nested(ElementBuilder::new("h1").text("welcome back"))
        .nested(ElementBuilder::new("p").text("please log in to continue"));

    // Banner (oculto hasta que haya mensaje)
    let banner_text = ElementBuilder::new("span").class("banner-text").build()?;
    let banner_close = ElementBuilder::new("button")
        .class("banner-close")
        .attr("type", "button")
        .attr("aria-label", LABEL_DISMISS)
        .text("✕")
        .build()?;
    let banner = ElementBuilder::new("div")
        .class("error-banner")
        .attr("role", "alert")
        .flag("hidden")
        .nested(ElementBuilder::new("span").class("error-icon").text("⚠️"))
        .child(&banner_text)
        .child(&banner_close)
        .build()?;

    let email = ElementBuilder::new("input")
        .id("email")
        .attr("type", "text")
        .attr("placeholder", PLACEHOLDER_EMAIL)
        .attr("autocomplete", "email")
        .build()?;
    let email_error = error_slot()?;

    let password = ElementBuilder::new("input")
        .id("password")
        .attr("type", "password")
        .attr("placeholder", PLACEHOLDER_PASSWORD)
        .attr("autocomplete", "current-password")
        .build()?;
    let toggle = ElementBuilder::new("button")
        .class("password-toggle")
        .attr("type", "button")
        .attr("aria-label", LABEL_SHOW_PASSWORD)
        .text("🙈")
        .build()?;
    let password_error = error_slot()?;

    let spinner = ElementBuilder::new("span")
        .class("button-spinner")
        .flag("hidden")
        .build()?;
    let submit_label = ElementBuilder::new("span")
        .class("button-label")
        .text(LABEL_LOG_IN)
        .build()?;
    let submit = ElementBuilder::new("button")
        .class("login-button")
        .attr("type", "submit")
        .child(&spinner)
        .child(&submit_label)
        .build()?;

    let form = ElementBuilder::new("form")
        .class("login-form")
        .flag("novalidate")
        .child(&banner)
        .nested(field_group("email", LABEL_EMAIL).child(&email).child(&email_error))
        .nested(
            field_group("password", LABEL_PASSWORD)
                .nested(
                    ElementBuilder::new("div")
                        .class("password-input-wrapper")
                        .child(&password)
                        .child(&toggle),
                )
                .child(&password_error),
        )
        .child(&submit)
        .build()?;

    let mut container = ElementBuilder::new("div")
        .class("login-container")
        .nested(header)
        .child(&form);
    if CONFIG.is_demo() {
        container = container.nested(
            ElementBuilder::new("div")
                .class("login-footer")
                .nested(ElementBuilder::new("p").text(MSG_DEMO_HINT)),
        );
    }

    let page = ElementBuilder::new("div")
        .class("login-page")
        .nested(container)
        .build()?;

    Ok((
        page,
        LoginRefs {
            form,
            banner,
            banner_close,
            banner_text,
            email,
            email_error,
            password,
            password_error,
            toggle,
            submit,
            spinner,
            submit_label,
        },
    ))
}

fn field_group(input_id: &str, label: &str) -> ElementBuilder {
    ElementBuilder::new("div")
        .class("form-group")
        .nested(ElementBuilder::new("label").attr("for", input_id).text(label))
}

fn error_slot() -> Result<Element, JsValue> {
    ElementBuilder::new("span")
        .class("field-error")
        .flag("hidden")
        .build()
}

/// Llevar el DOM al estado del snapshot. Los valores de los inputs no se
/// tocan: el DOM ya los tiene.
fn paint(refs: &LoginRefs, view: &LoginView) -> Result<(), JsValue> {
    // Banner
    set_flag(&refs.banner, "hidden", view.banner.is_none())?;
    set_text(&refs.banner_text, view.banner.as_deref().unwrap_or(""));

    // Campos
    paint_field(&refs.email, &refs.email_error, view.email_error.as_deref(), view.disabled)?;
    paint_field(&refs.password, &refs.password_error, view.password_error.as_deref(), view.disabled)?;
    refs.password.set_attribute("type", view.password_input_type)?;

    // Toggle
    refs.toggle.set_attribute("aria-label", view.toggle_label)?;
    set_text(&refs.toggle, if view.password_visible { "👁️" } else { "🙈" });

    // Submit
    set_flag(&refs.submit, "disabled", view.disabled)?;
    set_flag(&refs.spinner, "hidden", !view.busy)?;
    set_text(&refs.submit_label, view.submit_label);

    Ok(())
}

fn paint_field(
    input: &Element,
    error_el: &Element,
    error: Option<&str>,
    disabled: bool,
) -> Result<(), JsValue> {
    set_flag(input, "disabled", disabled)?;
    toggle_class(input, "error", error.is_some())?;
    set_flag(error_el, "hidden", error.is_none())?;
    set_text(error_el, error.unwrap_or(""));
    Ok(())
}
