//! Managed workstations and laptops

use crate::core::aggregate::AggregateSpec;
use crate::core::field::FieldDescriptor;
use crate::core::query::SortSpec;
use crate::core::schema::EntitySchema;

pub const COLLECTION: &str = "pcs";

/// Values of the `status` field
pub const STATUSES: &[&str] = &["online", "offline", "maintenance"];

pub fn schema() -> EntitySchema {
    EntitySchema::new(COLLECTION, "pc")
        .field(FieldDescriptor::text("name").searchable())
        .field(FieldDescriptor::text("hostname").searchable())
        .field(FieldDescriptor::text("ip_address").searchable())
        .field(FieldDescriptor::text("assigned_to").searchable())
        .field(FieldDescriptor::enumeration("os"))
        .field(FieldDescriptor::enumeration("department"))
        .field(FieldDescriptor::enumeration("status"))
        .field(FieldDescriptor::number("cost"))
        .field(FieldDescriptor::date("purchase_date"))
        .field(FieldDescriptor::date("last_seen"))
        .facet("status")
        .facet("os")
        .facet("department")
        .default_sort(SortSpec::asc("name"))
        .card(AggregateSpec::count_by("status").with_label("PCs by status"))
        .card(AggregateSpec::count_by("os").with_label("Operating systems"))
        .card(AggregateSpec::sum_by("department", "cost").with_label("Spend by department"))
}
