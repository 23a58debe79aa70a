use scraper::{ElementRef, Html, Selector};

#[track_caller]
pub(crate) fn must_get_form(html: &Html) -> ElementRef<'_> {
    html.select(&Selector::parse("form").unwrap())
        .next()
        .expect("No form found")
}

/// Assert that `element` sends its request to `endpoint` via the htmx
/// `attribute`, e.g. `hx-post`.
#[track_caller]
pub(crate) fn assert_hx_endpoint(element: &ElementRef<'_>, endpoint: &str, attribute: &str) {
    let got = element
        .value()
        .attr(attribute)
        .unwrap_or_else(|| panic!("{attribute} attribute missing"));

    assert_eq!(
        got, endpoint,
        "want element with attribute {attribute}=\"{endpoint}\", got {got:?}"
    );
}

/// Assert that the form has a required input called `name` of type `type_`.
#[track_caller]
pub(crate) fn assert_form_input(form: &ElementRef<'_>, name: &str, type_: &str) {
    let input = find_named(form, "input", name)
        .unwrap_or_else(|| panic!("No input found with name \"{name}\""));

    let input_type = input.value().attr("type").unwrap_or_default();
    assert_eq!(
        input_type, type_,
        "want input {name} with type \"{type_}\", got {input_type:?}"
    );
    assert_required(&input, name);
}

/// Assert that the form has a required select called `name`.
#[track_caller]
pub(crate) fn assert_form_select(form: &ElementRef<'_>, name: &str) {
    let select = find_named(form, "select", name)
        .unwrap_or_else(|| panic!("No select found with name \"{name}\""));

    assert_required(&select, name);
}

fn find_named<'a>(form: &ElementRef<'a>, tag: &str, name: &str) -> Option<ElementRef<'a>> {
    form.select(&Selector::parse(tag).unwrap())
        .find(|element| element.value().attr("name") == Some(name))
}

#[track_caller]
fn assert_required(element: &ElementRef<'_>, name: &str) {
    assert!(
        element.value().attr("required").is_some(),
        "want {name} to have the required attribute but got none"
    );
}
