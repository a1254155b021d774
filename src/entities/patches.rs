//! OS and application patches

use crate::core::aggregate::AggregateSpec;
use crate::core::field::FieldDescriptor;
use crate::core::query::SortSpec;
use crate::core::schema::EntitySchema;

pub const COLLECTION: &str = "patches";

pub const SEVERITIES: &[&str] = &["critical", "important", "moderate", "low"];
pub const STATUSES: &[&str] = &["pending", "installed", "failed"];

pub fn schema() -> EntitySchema {
    EntitySchema::new(COLLECTION, "patch")
        .field(FieldDescriptor::text("title").searchable())
        .field(FieldDescriptor::text("kb_number").searchable())
        .field(FieldDescriptor::text("product").searchable())
        .field(FieldDescriptor::enumeration("severity"))
        .field(FieldDescriptor::enumeration("status"))
        .field(FieldDescriptor::number("affected_systems"))
        .field(FieldDescriptor::date("release_date"))
        .field(FieldDescriptor::date("installed_date"))
        .facet("severity")
        .facet("status")
        .default_sort(SortSpec::desc("release_date"))
        .card(AggregateSpec::count_by("status").with_label("Patch status"))
        .card(AggregateSpec::count_by("severity").with_label("Patches by severity"))
        .card(AggregateSpec::sum_by("severity", "affected_systems").with_label("Exposure by severity"))
}
