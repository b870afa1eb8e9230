use std::{borrow::Cow, fmt};

use crate::{
    quote::{quote, unquote},
    trivia::{detach_above, first_block_comment, own_line, trailing_len},
};

/// A parsed file: the root value and whatever trivia follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub root: Node,
    pub trailing: String,
}

/// A value with the trivia written before it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub leading: String,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Scalar(Scalar),
    Array(Array),
    Dict(Dict),
}

/// A string or data token, kept exactly as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scalar {
    raw: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dict {
    pub entries: Vec<Entry>,
    /// Trivia before the closing brace
    pub close_leading: String,
}

/// `key = value;` inside a dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key_leading: String,
    pub key: Scalar,
    pub eq_leading: String,
    pub value: Node,
    pub semi_leading: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Array {
    pub items: Vec<ArrayItem>,
    /// Trivia before the closing parenthesis
    pub close_leading: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayItem {
    pub node: Node,
    /// Trivia before the separating comma; `None` when the item has no comma
    pub comma_leading: Option<String>,
}

impl Scalar {
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self { raw: quote(text) }
    }

    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub fn text(&self) -> Cow<'_, str> {
        unquote(&self.raw)
    }
}

impl Value {
    #[must_use]
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        self.as_scalar().map(Scalar::text)
    }

    #[must_use]
    pub fn as_dict(&self) -> Option<&Dict> {
        match self {
            Self::Dict(dict) => Some(dict),
            _ => None,
        }
    }

    pub fn as_dict_mut(&mut self) -> Option<&mut Dict> {
        match self {
            Self::Dict(dict) => Some(dict),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Array> {
        match self {
            Self::Array(array) => Some(array),
            _ => None,
        }
    }
}

impl Entry {
    #[must_use]
    pub fn key_text(&self) -> Cow<'_, str> {
        self.key.text()
    }

    /// The `/* ... */` note Xcode writes between a key and its `=`.
    #[must_use]
    pub fn annotation(&self) -> Option<&str> {
        first_block_comment(&self.eq_leading)
    }
}

impl ArrayItem {
    /// The `/* ... */` note written after the item.
    #[must_use]
    pub fn annotation(&self) -> Option<&str> {
        self.comma_leading.as_deref().and_then(first_block_comment)
    }
}

impl Dict {
    #[must_use]
    pub fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.key_text() == key)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.position(key).map(|index| &self.entries[index].value.value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        let index = self.position(key)?;
        Some(&mut self.entries[index].value.value)
    }

    /// Trivia of the node after `index`: the next entry's key or the closing brace.
    pub fn leading_after_mut(&mut self, index: usize) -> &mut String {
        match self.entries.get_mut(index) {
            Some(entry) => &mut entry.key_leading,
            None => &mut self.close_leading,
        }
    }

    /// Removes the entry at `index`.
    ///
    /// Comments on the lines above the entry (section markers and the like)
    /// stay in the document, attached to whatever follows it.
    pub fn remove_at(&mut self, index: usize) -> Entry {
        let mut entry = self.entries.remove(index);
        let above = detach_above(&mut entry.key_leading);
        if !above.is_empty() {
            self.leading_after_mut(index).insert_str(0, &above);
        }
        entry
    }
}

impl Array {
    /// Item texts in order, skipping nested containers.
    pub fn texts(&self) -> impl Iterator<Item = Cow<'_, str>> {
        self.items.iter().filter_map(|item| item.node.value.as_text())
    }

    /// Appends a bare token followed by an optional `/* annotation */`,
    /// copying the layout of the existing items.
    ///
    /// A list written without a trailing comma stays that way: the previous
    /// last item gains the separating comma and the new item ends the list.
    pub fn push(&mut self, raw: &str, annotation: Option<&str>) {
        let leading = match self.items.last() {
            Some(last) => match own_line(&last.node.leading) {
                "" => " ".to_string(),
                line => line.to_string(),
            },
            None => match own_line(&self.close_leading) {
                "" => " ".to_string(),
                line => format!("{line}\t"),
            },
        };
        let note = annotation
            .map(|annotation| format!(" /* {} */", annotation.replace("*/", "* /")))
            .unwrap_or_default();
        let node = Node {
            leading,
            value: Value::Scalar(Scalar::from_raw(raw)),
        };
        let trailing_comma = self
            .items
            .last()
            .is_none_or(|last| last.comma_leading.is_some());
        if trailing_comma {
            self.items.push(ArrayItem {
                node,
                comma_leading: Some(note),
            });
            return;
        }
        let rest = self.close_leading.split_off(trailing_len(&self.close_leading));
        let separator = std::mem::replace(&mut self.close_leading, note + &rest);
        if let Some(last) = self.items.last_mut() {
            last.comma_leading = Some(separator);
        }
        self.items.push(ArrayItem {
            node,
            comma_leading: None,
        });
    }

    /// Removes the item at `index`, keeping comments on the lines above it.
    ///
    /// Removing the last item of a list without a trailing comma also drops
    /// the comma after the item that now ends the list.
    pub fn remove_at(&mut self, index: usize) -> ArrayItem {
        let mut item = self.items.remove(index);
        if item.comma_leading.is_none() && index == self.items.len() {
            let rest = self.close_leading.split_off(trailing_len(&self.close_leading));
            self.close_leading = match self.items.last_mut().and_then(|last| last.comma_leading.take()) {
                Some(comma_leading) => comma_leading + &rest,
                None => rest,
            };
        }
        let above = detach_above(&mut item.node.leading);
        if !above.is_empty() {
            match self.items.get_mut(index) {
                Some(next) => next.node.leading.insert_str(0, &above),
                None => self.close_leading.insert_str(0, &above),
            }
        }
        item
    }

    /// Removes every scalar item whose text satisfies `predicate`.
    /// Returns how many items were removed.
    pub fn remove_texts(&mut self, predicate: impl Fn(&str) -> bool) -> usize {
        let matching: Vec<usize> = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.node.value.as_text().is_some_and(|text| predicate(&text)))
            .map(|(index, _)| index)
            .collect();
        for index in matching.iter().rev() {
            self.remove_at(*index);
        }
        matching.len()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.root, self.trailing)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.leading, self.value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(scalar) => f.write_str(scalar.raw()),
            Self::Array(array) => array.fmt(f),
            Self::Dict(dict) => dict.fmt(f),
        }
    }
}

impl fmt::Display for Dict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for entry in &self.entries {
            entry.fmt(f)?;
        }
        write!(f, "{}}}", self.close_leading)
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}={}{};",
            self.key_leading,
            self.key.raw(),
            self.eq_leading,
            self.value,
            self.semi_leading
        )
    }
}

impl fmt::Display for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for item in &self.items {
            item.node.fmt(f)?;
            if let Some(comma_leading) = &item.comma_leading {
                write!(f, "{comma_leading},")?;
            }
        }
        write!(f, "{})", self.close_leading)
    }
}

#[cfg(test)]
mod tests {
    use crate::parse;

    fn parse_array(src: &str) -> crate::Array {
        let document = parse(src).unwrap();
        document.root.value.as_array().unwrap().clone()
    }

    #[test]
    fn test_dict_lookup_by_unquoted_key() {
        let document = parse(r#"{ "name" = App; isa = PBXNativeTarget; }"#).unwrap();
        let dict = document.root.value.as_dict().unwrap();
        assert_eq!(dict.get("name").unwrap().as_text().unwrap(), "App");
        assert_eq!(dict.position("isa"), Some(1));
        assert!(dict.get("missing").is_none());
    }

    #[test]
    fn test_entry_annotation() {
        let document = parse("{\n\tABC /* Sources */ = {isa = PBXSourcesBuildPhase; };\n}").unwrap();
        let dict = document.root.value.as_dict().unwrap();
        assert_eq!(dict.entries[0].annotation(), Some("Sources"));
    }

    #[test]
    fn test_array_push_follows_item_layout() {
        let mut array = parse_array("(\n\t\t\t\tA /* a */,\n\t\t\t)");
        array.push("B", Some("b"));
        assert_eq!(array.to_string(), "(\n\t\t\t\tA /* a */,\n\t\t\t\tB /* b */,\n\t\t\t)");
        assert_eq!(array.items[1].annotation(), Some("b"));
    }

    #[test]
    fn test_array_push_into_empty_multiline() {
        let mut array = parse_array("(\n\t\t\t)");
        array.push("B", None);
        assert_eq!(array.to_string(), "(\n\t\t\t\tB,\n\t\t\t)");
    }

    #[test]
    fn test_array_push_into_empty_inline() {
        let mut array = parse_array("()");
        array.push("B", None);
        assert_eq!(array.to_string(), "( B,)");
    }

    #[test]
    fn test_array_push_without_trailing_comma() {
        let original = "(\n\tA /* a */\n)";
        let mut array = parse_array(original);
        array.push("B", Some("b"));
        assert_eq!(array.to_string(), "(\n\tA /* a */,\n\tB /* b */\n)");
        assert_eq!(array.texts().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(array.remove_texts(|text| text == "B"), 1);
        assert_eq!(array.to_string(), original);
    }

    #[test]
    fn test_array_push_inline_without_trailing_comma() {
        let original = "(B0)";
        let mut array = parse_array(original);
        array.push("NEW", Some("x"));
        assert_eq!(array.to_string(), "(B0, NEW /* x */)");
        array.remove_texts(|text| text == "NEW");
        assert_eq!(array.to_string(), original);
    }

    #[test]
    fn test_array_remove_only_item_without_trailing_comma() {
        let mut array = parse_array("(\n\tA /* a */\n)");
        array.remove_texts(|text| text == "A");
        assert_eq!(array.to_string(), "(\n)");
    }

    #[test]
    fn test_array_push_crlf_layout() {
        let original = "(\r\n\t\t\t\tA /* a */,\r\n\t\t\t)";
        let mut array = parse_array(original);
        array.push("B", Some("b"));
        assert_eq!(
            array.to_string(),
            "(\r\n\t\t\t\tA /* a */,\r\n\t\t\t\tB /* b */,\r\n\t\t\t)"
        );
        array.remove_texts(|text| text == "B");
        assert_eq!(array.to_string(), original);
    }

    #[test]
    fn test_array_remove_texts_preserves_order() {
        let mut array = parse_array("(\n\tA /* a */,\n\tB /* b */,\n\tC /* c */,\n)");
        assert_eq!(array.remove_texts(|text| text == "B"), 1);
        assert_eq!(array.to_string(), "(\n\tA /* a */,\n\tC /* c */,\n)");
        assert_eq!(array.remove_texts(|text| text == "Z"), 0);
    }

    #[test]
    fn test_dict_remove_at_keeps_section_comment() {
        let src = "{\n/* Begin X section */\n\tA = 1;\n\tB = 2;\n/* End X section */\n}";
        let mut document = parse(src).unwrap();
        let dict = document.root.value.as_dict_mut().unwrap();
        let removed = dict.remove_at(0);
        assert_eq!(removed.key_text(), "A");
        assert_eq!(
            document.to_string(),
            "{\n/* Begin X section */\n\tB = 2;\n/* End X section */\n}"
        );
    }
}
