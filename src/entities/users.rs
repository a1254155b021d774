//! User directory

use crate::core::aggregate::AggregateSpec;
use crate::core::field::FieldDescriptor;
use crate::core::query::SortSpec;
use crate::core::schema::EntitySchema;

pub const COLLECTION: &str = "users";

pub const ROLES: &[&str] = &["admin", "technician", "user"];

pub fn schema() -> EntitySchema {
    EntitySchema::new(COLLECTION, "user")
        .field(FieldDescriptor::text("name").searchable())
        .field(FieldDescriptor::text("email").searchable())
        .field(FieldDescriptor::text("phone"))
        .field(FieldDescriptor::enumeration("department"))
        .field(FieldDescriptor::enumeration("role"))
        .field(FieldDescriptor::enumeration("status"))
        .field(FieldDescriptor::date("last_login"))
        .facet("department")
        .facet("role")
        .facet("status")
        .default_sort(SortSpec::asc("name"))
        .card(AggregateSpec::count_by("role").with_label("Users by role"))
        .card(AggregateSpec::count_by("status").with_label("Active accounts"))
        .card(AggregateSpec::count_by("department").with_label("Headcount by department"))
}
