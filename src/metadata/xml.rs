//! Reading the field nodes of an Align document
//!
//! Only the direct text of each child of the root's first element matters.
//! Text after a nested element belongs to that element, not to the field.

use quick_xml::events::Event;
use quick_xml::Reader;

/// Direct text of every child of the root's first element, in document order
///
/// Children without text (empty or text-less elements) yield `None`.
pub fn field_node_texts(content: &str) -> Result<Vec<Option<String>>, String> {
    let mut reader = Reader::from_str(content.trim_start_matches('\u{feff}'));

    let mut fields: Vec<Option<String>> = Vec::new();
    let mut depth = 0usize;
    let mut in_container = false;
    let mut container_done = false;
    // index of the open field and whether it already had a child element
    let mut open_field: Option<(usize, bool)> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| format!("XML error at byte {}: {}", reader.buffer_position(), e))?;

        match event {
            Event::Start(_) => {
                depth += 1;
                match depth {
                    2 if !container_done && !in_container => in_container = true,
                    3 if in_container => {
                        fields.push(None);
                        open_field = Some((fields.len() - 1, false));
                    },
                    d if d > 3 && in_container => {
                        if let Some((_, had_child)) = open_field.as_mut() {
                            *had_child = true;
                        }
                    },
                    _ => {},
                }
            },
            Event::Empty(_) => match depth + 1 {
                2 if !container_done && !in_container => container_done = true,
                3 if in_container => fields.push(None),
                d if d > 3 && in_container => {
                    if let Some((_, had_child)) = open_field.as_mut() {
                        *had_child = true;
                    }
                },
                _ => {},
            },
            Event::Text(text) => {
                if let Some((idx, false)) = open_field {
                    if depth == 3 {
                        let value = text.unescape().map_err(|e| format!("Bad XML text: {}", e))?;
                        fields[idx].get_or_insert_with(String::new).push_str(&value);
                    }
                }
            },
            Event::CData(data) => {
                if let Some((idx, false)) = open_field {
                    if depth == 3 {
                        let value = String::from_utf8_lossy(&data);
                        fields[idx].get_or_insert_with(String::new).push_str(&value);
                    }
                }
            },
            Event::End(_) => {
                match depth {
                    3 if in_container => open_field = None,
                    2 if in_container => {
                        in_container = false;
                        container_done = true;
                    },
                    _ => {},
                }
                depth = depth.saturating_sub(1);
            },
            Event::Eof => break,
            _ => {},
        }
    }

    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::field_node_texts;

    #[test]
    fn reads_children_of_first_element_only() {
        let xml = r#"<?xml version="1.0" encoding="utf-8"?>
<Root>
  <Alignment>
    <Rotation>0.5</Rotation>
    <Center>1,2</Center>
    <Empty/>
    <Nested>7<Inner>9</Inner>8</Nested>
  </Alignment>
  <Other><Ignored>3</Ignored></Other>
</Root>"#;

        let texts = field_node_texts(xml).unwrap();
        assert_eq!(texts, vec![
            Some("0.5".to_string()),
            Some("1,2".to_string()),
            None,
            Some("7".to_string()),
        ]);
    }

    #[test]
    fn malformed_documents_are_errors() {
        assert!(field_node_texts("<Root><A><B>1</C></A></Root>").is_err());
    }

    #[test]
    fn document_without_container_has_no_fields() {
        assert_eq!(field_node_texts("<Root/>").unwrap(), Vec::<Option<String>>::new());
    }
}
