//! XPath lookup through `document.evaluate`.

use crate::cdp::error::CdpError;
use crate::cdp::protocol::{PropertyDescriptor, RemoteObject};

use super::core::PageSession;

/// Build an expression that evaluates `xpath` against the document and yields the matched
/// elements as an array, in document order.
///
/// A match that is not an element (text, attribute, comment) throws, the same way WebDriver
/// rejects such selectors.
pub(crate) fn xpath_snapshot_script(xpath: &str) -> String {
    let literal = serde_json::Value::String(xpath.to_string()).to_string();
    format!(
        r#"(() => {{
  const xpath = {literal};
  const snapshot = document.evaluate(
    xpath, document, null, XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null);
  const nodes = [];
  for (let i = 0; i < snapshot.snapshotLength; i++) {{
    const node = snapshot.snapshotItem(i);
    if (node.nodeType !== Node.ELEMENT_NODE) {{
      throw new TypeError("The result of the xpath expression " + xpath + " is " +
        node.nodeName + ". It should be an element.");
    }}
    nodes.push(node);
  }}
  return nodes;
}})()"#
    )
}

/// Pull the numbered entries out of an array's property list, in index order.
pub(crate) fn array_items(props: Vec<PropertyDescriptor>) -> Vec<RemoteObject> {
    let mut indexed: Vec<(usize, RemoteObject)> = props
        .into_iter()
        .filter_map(|prop| {
            let index = prop.name.parse::<usize>().ok()?;
            Some((index, prop.value?))
        })
        .collect();
    indexed.sort_by_key(|(index, _)| *index);
    indexed.into_iter().map(|(_, obj)| obj).collect()
}

impl PageSession {
    /// Every element currently matching `xpath`, as remote objects held in `object_group`.
    pub async fn evaluate_xpath(
        &self,
        xpath: &str,
        object_group: &str,
    ) -> Result<Vec<RemoteObject>, CdpError> {
        let array = self
            .evaluate_handle(&xpath_snapshot_script(xpath), object_group)
            .await?;

        let array_id = array.object_id.ok_or_else(|| {
            CdpError::InvalidResponse("XPath snapshot returned no object".to_string())
        })?;

        let props = self.get_properties(&array_id).await?;
        Ok(array_items(props)
            .into_iter()
            .filter(|obj| obj.object_id.is_some())
            .collect())
    }
}
