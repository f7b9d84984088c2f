//! The hierarchical form model: leaf fields, named groups, and repeating
//! groups, plus dotted-path lookup.
//!
//! Trees are declared up front by the form-construction collaborator with
//! [`GroupBuilder`]; validation failures on each field are written by an
//! external rule engine. This crate reads that state and injects the
//! synthetic server-error kind.

use serde_json::Value;

use crate::message::FailureKind;

/// A leaf validated value holder.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Field {
    /// Current value.
    pub value: String,
    /// Whether the field has received focus at least once.
    pub touched: bool,
    /// Whether the value has been edited since construction.
    pub dirty: bool,
    failures: Vec<FailureKind>,
}

impl Field {
    /// Creates a field with an initial value and no validation state.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            touched: false,
            dirty: false,
            failures: Vec::new(),
        }
    }

    /// Creates an empty, pristine field.
    #[must_use]
    pub fn empty() -> Self {
        Self::new("")
    }

    /// Marks the field as touched.
    #[must_use]
    pub fn touched(mut self) -> Self {
        self.touched = true;
        self
    }

    /// Marks the field as dirty.
    #[must_use]
    pub fn dirty(mut self) -> Self {
        self.dirty = true;
        self
    }

    /// Replaces the value and marks the field dirty.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.dirty = true;
    }

    /// Replaces the active failure kinds. Called by the external rule engine
    /// on every value change.
    pub fn set_failures(&mut self, failures: Vec<FailureKind>) {
        self.failures = failures;
    }

    /// Appends a failure kind, keeping the ones already present.
    pub fn push_failure(&mut self, failure: FailureKind) {
        self.failures.push(failure);
    }

    /// Returns the active failure kinds.
    pub fn failures(&self) -> &[FailureKind] {
        &self.failures
    }

    /// Returns whether any failure kind is active.
    pub fn is_invalid(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Returns whether the user has interacted with the field.
    pub fn is_interacted(&self) -> bool {
        self.dirty || self.touched
    }
}

/// A node in the form tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A leaf field.
    Field(Field),
    /// A named sub-group.
    Group(Group),
    /// An ordered sequence of row groups.
    Repeating(RepeatingGroup),
}

impl Node {
    /// Returns the node as a field, if it is one.
    pub fn as_field(&self) -> Option<&Field> {
        match self {
            Self::Field(field) => Some(field),
            _ => None,
        }
    }

    /// Returns the node as a mutable field, if it is one.
    pub fn as_field_mut(&mut self) -> Option<&mut Field> {
        match self {
            Self::Field(field) => Some(field),
            _ => None,
        }
    }

    /// Returns the node as a group, if it is one.
    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Self::Group(group) => Some(group),
            _ => None,
        }
    }

    /// Returns the node as a repeating group, if it is one.
    pub fn as_repeating(&self) -> Option<&RepeatingGroup> {
        match self {
            Self::Repeating(repeating) => Some(repeating),
            _ => None,
        }
    }

    fn is_invalid(&self) -> bool {
        match self {
            Self::Field(field) => field.is_invalid(),
            Self::Group(group) => group.is_invalid(),
            Self::Repeating(repeating) => repeating.is_invalid(),
        }
    }

    fn mark_all_touched(&mut self) {
        match self {
            Self::Field(field) => field.touched = true,
            Self::Group(group) => group.mark_all_touched(),
            Self::Repeating(repeating) => repeating.mark_all_touched(),
        }
    }
}

/// A named mapping from field name to node.
///
/// Keys are unique and iteration order is declaration order. Lookup by
/// dotted path is supported via [`Group::get`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Group {
    entries: Vec<(String, Node)>,
}

impl Group {
    /// Creates an empty group.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a node under a name. An existing entry with the same name is
    /// replaced in place, preserving its position.
    pub fn insert(&mut self, name: impl Into<String>, node: Node) {
        let name = name.into();
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = node;
        } else {
            self.entries.push((name, node));
        }
    }

    /// Returns the immediate child under a single-segment name.
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, node)| node)
    }

    /// Returns the immediate child under a single-segment name, mutably.
    pub fn child_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.entries
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, node)| node)
    }

    /// Resolves a dotted path by descending through sub-groups.
    ///
    /// A segment naming a repeating group terminates resolution: the path
    /// must stop there to refer to the whole group. Numeric row indices are
    /// not interpreted; callers index into rows themselves. Any miss returns
    /// `None` and must be treated as "skip silently".
    pub fn get(&self, path: &str) -> Option<&Node> {
        let mut segments = path.split('.');
        let mut current = self.child(segments.next()?)?;
        for segment in segments {
            match current {
                Node::Group(group) => current = group.child(segment)?,
                Node::Field(_) | Node::Repeating(_) => return None,
            }
        }
        Some(current)
    }

    /// Resolves a dotted path mutably. Same contract as [`Group::get`].
    pub fn get_mut(&mut self, path: &str) -> Option<&mut Node> {
        let mut segments = path.split('.');
        let mut current = self.child_mut(segments.next()?)?;
        for segment in segments {
            match current {
                Node::Group(group) => current = group.child_mut(segment)?,
                Node::Field(_) | Node::Repeating(_) => return None,
            }
        }
        Some(current)
    }

    /// Resolves a dotted path to a leaf field.
    pub fn field(&self, path: &str) -> Option<&Field> {
        self.get(path).and_then(Node::as_field)
    }

    /// Resolves a dotted path to a leaf field, mutably.
    pub fn field_mut(&mut self, path: &str) -> Option<&mut Field> {
        self.get_mut(path).and_then(Node::as_field_mut)
    }

    /// Iterates immediate children in declaration order.
    pub fn children(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(name, node)| (name.as_str(), node))
    }

    /// Returns the number of immediate children.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the group has no children.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Aggregate validity: true iff any descendant field, including fields
    /// inside repeating rows, carries an active failure kind.
    pub fn is_invalid(&self) -> bool {
        self.entries.iter().any(|(_, node)| node.is_invalid())
    }

    /// Marks every descendant field as touched. Used by the submit path so
    /// a scan picks up invalid fields the user never reached.
    pub fn mark_all_touched(&mut self) {
        for (_, node) in &mut self.entries {
            node.mark_all_touched();
        }
    }

    /// Snapshots the current values as a nested JSON object, with arrays for
    /// repeating groups. Used as the distinct-until-changed key by the
    /// change debouncer.
    pub fn value_snapshot(&self) -> Value {
        let mut map = serde_json::Map::new();
        for (name, node) in &self.entries {
            let value = match node {
                Node::Field(field) => Value::String(field.value.clone()),
                Node::Group(group) => group.value_snapshot(),
                Node::Repeating(repeating) => Value::Array(
                    repeating.rows().iter().map(Group::value_snapshot).collect(),
                ),
            };
            map.insert(name.clone(), value);
        }
        Value::Object(map)
    }
}

/// An ordered sequence of row groups, one per item in a dynamic list.
///
/// Row order is significant and stable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RepeatingGroup {
    rows: Vec<Group>,
}

impl RepeatingGroup {
    /// Creates an empty repeating group.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a row.
    pub fn push_row(&mut self, row: Group) {
        self.rows.push(row);
    }

    /// Appends a row, builder style.
    #[must_use]
    pub fn row(mut self, row: Group) -> Self {
        self.rows.push(row);
        self
    }

    /// Returns the rows in order.
    pub fn rows(&self) -> &[Group] {
        &self.rows
    }

    /// Returns the rows in order, mutably.
    pub fn rows_mut(&mut self) -> &mut [Group] {
        &mut self.rows
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns whether there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn is_invalid(&self) -> bool {
        self.rows.iter().any(Group::is_invalid)
    }

    fn mark_all_touched(&mut self) {
        for row in &mut self.rows {
            row.mark_all_touched();
        }
    }
}

/// Builder for declaring a form tree up front.
#[derive(Debug, Default)]
pub struct GroupBuilder {
    group: Group,
}

impl GroupBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a leaf field.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, field: Field) -> Self {
        self.group.insert(name, Node::Field(field));
        self
    }

    /// Adds a nested group.
    #[must_use]
    pub fn group(mut self, name: impl Into<String>, group: Group) -> Self {
        self.group.insert(name, Node::Group(group));
        self
    }

    /// Adds a repeating group.
    #[must_use]
    pub fn repeating(mut self, name: impl Into<String>, repeating: RepeatingGroup) -> Self {
        self.group.insert(name, Node::Repeating(repeating));
        self
    }

    /// Returns the declared group.
    #[must_use]
    pub fn build(self) -> Group {
        self.group
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn address_form() -> Group {
        let address = GroupBuilder::new()
            .field("city", Field::empty())
            .field("zip", Field::empty())
            .build();
        GroupBuilder::new()
            .field("email", Field::new("a@b.example"))
            .group("address", address)
            .build()
    }

    #[test]
    fn test_children_keep_declaration_order() {
        let form = address_form();
        let names: Vec<&str> = form.children().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["email", "address"]);
    }

    #[test]
    fn test_insert_replaces_duplicate_in_place() {
        let mut group = Group::new();
        group.insert("a", Node::Field(Field::new("one")));
        group.insert("b", Node::Field(Field::empty()));
        group.insert("a", Node::Field(Field::new("two")));
        assert_eq!(group.len(), 2);
        assert_eq!(group.field("a").map(|f| f.value.as_str()), Some("two"));
        let names: Vec<&str> = group.children().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_get_resolves_dotted_path() {
        let form = address_form();
        assert!(form.field("address.city").is_some());
        assert!(form.field("email").is_some());
    }

    #[test]
    fn test_get_miss_returns_none() {
        let form = address_form();
        assert!(form.get("address.country").is_none());
        assert!(form.get("phone").is_none());
        assert!(form.get("email.domain").is_none());
    }

    #[test]
    fn test_path_stops_at_repeating_group() {
        let rows = RepeatingGroup::new()
            .row(GroupBuilder::new().field("name", Field::empty()).build());
        let form = GroupBuilder::new().repeating("items", rows).build();

        // The whole group is addressable; descending past it is not.
        assert!(matches!(form.get("items"), Some(Node::Repeating(_))));
        assert!(form.get("items.name").is_none());
        assert!(form.get("items.0.name").is_none());
    }

    #[test]
    fn test_aggregate_validity_reaches_rows() {
        let mut row = GroupBuilder::new().field("qty", Field::empty()).build();
        row.field_mut("qty")
            .unwrap()
            .set_failures(vec![FailureKind::Required]);
        let form = GroupBuilder::new()
            .field("email", Field::empty())
            .repeating("items", RepeatingGroup::new().row(row))
            .build();
        assert!(form.is_invalid());
    }

    #[test]
    fn test_mark_all_touched_reaches_nested_fields() {
        let mut form = address_form();
        form.mark_all_touched();
        assert!(form.field("email").unwrap().touched);
        assert!(form.field("address.city").unwrap().touched);
    }

    #[test]
    fn test_value_snapshot_shape() {
        let rows = RepeatingGroup::new()
            .row(GroupBuilder::new().field("name", Field::new("first")).build())
            .row(GroupBuilder::new().field("name", Field::new("second")).build());
        let form = GroupBuilder::new()
            .field("email", Field::new("a@b.example"))
            .repeating("items", rows)
            .build();

        assert_eq!(
            form.value_snapshot(),
            json!({
                "email": "a@b.example",
                "items": [{ "name": "first" }, { "name": "second" }],
            })
        );
    }

    #[test]
    fn test_set_value_marks_dirty() {
        let mut field = Field::empty();
        assert!(!field.is_interacted());
        field.set_value("x");
        assert!(field.dirty);
        assert!(field.is_interacted());
    }
}
