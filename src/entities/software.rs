//! Installed software and licenses

use crate::core::aggregate::AggregateSpec;
use crate::core::field::FieldDescriptor;
use crate::core::query::SortSpec;
use crate::core::schema::EntitySchema;

pub const COLLECTION: &str = "software";

pub const LICENSE_TYPES: &[&str] = &["perpetual", "subscription", "open_source", "freeware"];

pub fn schema() -> EntitySchema {
    EntitySchema::new(COLLECTION, "software")
        .field(FieldDescriptor::text("name").searchable())
        .field(FieldDescriptor::text("publisher").searchable())
        .field(FieldDescriptor::text("version").searchable())
        .field(FieldDescriptor::enumeration("license_type"))
        .field(FieldDescriptor::enumeration("status"))
        .field(FieldDescriptor::number("installations"))
        .field(FieldDescriptor::number("license_count"))
        .field(FieldDescriptor::number("cost"))
        .field(FieldDescriptor::date("expiry_date"))
        .facet("license_type")
        .facet("status")
        .default_sort(SortSpec::asc("name"))
        .card(AggregateSpec::count_by("license_type").with_label("License types"))
        .card(AggregateSpec::count_by("publisher").with_label("Titles per publisher"))
        .card(AggregateSpec::sum_by("publisher", "installations").with_label("Installations per publisher"))
}
