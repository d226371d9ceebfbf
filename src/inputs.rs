//! User input elements in HTML pages

use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::debug;

static FORM_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("form").expect("valid form selector"));
static INPUT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("input").expect("valid input selector"));
static BUTTON_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("button").expect("valid button selector"));
static SELECT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("select").expect("valid select selector"));
static TEXTAREA_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("textarea").expect("valid textarea selector"));

/// Input elements found on a page, as outer HTML in document order.
///
/// Everything except `forms` only lists elements that sit outside any form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScrapedInputs {
    pub forms: Vec<String>,
    pub inputs: Vec<String>,
    pub buttons: Vec<String>,
    pub selects: Vec<String>,
    pub text_areas: Vec<String>,
}

impl ScrapedInputs {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.forms.is_empty()
            && self.inputs.is_empty()
            && self.buttons.is_empty()
            && self.selects.is_empty()
            && self.text_areas.is_empty()
    }
}

/// Collect forms and the loose input elements outside them
#[must_use]
pub fn scrape_inputs(html: &str) -> ScrapedInputs {
    let document = Html::parse_document(html);

    let inputs = ScrapedInputs {
        forms: document.select(&FORM_SELECTOR).map(|form| form.html()).collect(),
        inputs: outside_forms(&document, &INPUT_SELECTOR),
        buttons: outside_forms(&document, &BUTTON_SELECTOR),
        selects: outside_forms(&document, &SELECT_SELECTOR),
        text_areas: outside_forms(&document, &TEXTAREA_SELECTOR),
    };

    debug!(
        forms = inputs.forms.len(),
        inputs = inputs.inputs.len(),
        buttons = inputs.buttons.len(),
        selects = inputs.selects.len(),
        text_areas = inputs.text_areas.len(),
        "scraped page inputs"
    );

    inputs
}

fn outside_forms(document: &Html, selector: &Selector) -> Vec<String> {
    document
        .select(selector)
        .filter(|element| !inside_form(element))
        .map(|element| element.html())
        .collect()
}

fn inside_form(element: &ElementRef) -> bool {
    element.ancestors().any(|node| {
        node.value()
            .as_element()
            .is_some_and(|ancestor| ancestor.name() == "form")
    })
}
