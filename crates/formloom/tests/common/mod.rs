#![allow(dead_code)]

use formloom::{FailureKind, Field, Group, GroupBuilder, RepeatingGroup};

/// A field that the external rule engine has flagged and the user has
/// interacted with.
pub fn failing(kind: FailureKind) -> Field {
    let mut field = Field::empty().touched();
    field.set_failures(vec![kind]);
    field
}

/// A checkout-style form: two leaf fields, a nested address group, and a
/// repeating item list with three rows.
pub fn checkout_form() -> Group {
    let address = GroupBuilder::new()
        .field("city", Field::empty())
        .field("zip", Field::empty())
        .build();

    let items = RepeatingGroup::new()
        .row(item_row("Widget", "2"))
        .row(item_row("Gadget", "1"))
        .row(item_row("Sprocket", "5"));

    GroupBuilder::new()
        .field("email", Field::empty())
        .field("coupon", Field::empty())
        .group("address", address)
        .repeating("items", items)
        .build()
}

fn item_row(name: &str, qty: &str) -> Group {
    GroupBuilder::new()
        .field("name", Field::new(name))
        .field("qty", Field::new(qty))
        .build()
}
