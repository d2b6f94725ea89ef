use scraper::{ElementRef, Selector};
use tracing::error;

use crate::errors::RetailerError;

pub(crate) fn selector(query_string: &str) -> Result<Selector, RetailerError> {
    Selector::parse(query_string)
        .map_err(|_| RetailerError::InvalidSelector(query_string.to_string()))
}

pub(crate) fn element_to_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().into()
}

pub(crate) fn element_extract_attr(
    element: ElementRef,
    attr_name: &str,
) -> Result<String, RetailerError> {
    let Some(attr_value) = element.attr(attr_name) else {
        error!(
            "Failed to find attribute {} in element {:?}",
            attr_name, element
        );
        return Err(RetailerError::HtmlElementMissingAttribute(
            attr_name.to_string(),
            element.html(),
        ));
    };

    Ok(attr_value.trim().into())
}

pub(crate) fn extract_element_from_element<'a>(
    element: ElementRef<'a>,
    query_string: &str,
) -> Result<ElementRef<'a>, RetailerError> {
    let Some(query_element) = element.select(&selector(query_string)?).next() else {
        error!(
            "Failed to find element '{}' in parent element {:?}",
            query_string, element
        );

        return Err(RetailerError::HtmlMissingElement(query_string.to_string()));
    };

    Ok(query_element)
}

/// Text of the first match, `None` when nothing matches
pub(crate) fn find_element_text(
    element: ElementRef,
    query_string: &str,
) -> Result<Option<String>, RetailerError> {
    Ok(element
        .select(&selector(query_string)?)
        .next()
        .map(element_to_text))
}
