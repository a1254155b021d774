//! Hardware items: monitors, printers, network gear, spare parts

use crate::core::aggregate::AggregateSpec;
use crate::core::field::FieldDescriptor;
use crate::core::query::SortSpec;
use crate::core::schema::EntitySchema;

pub const COLLECTION: &str = "hardware";

pub const STATUSES: &[&str] = &["in_use", "in_stock", "repair", "retired"];

pub fn schema() -> EntitySchema {
    EntitySchema::new(COLLECTION, "hardware item")
        .field(FieldDescriptor::text("name").searchable())
        .field(FieldDescriptor::text("serial_number").searchable())
        .field(FieldDescriptor::text("manufacturer").searchable())
        .field(FieldDescriptor::text("location").searchable())
        .field(FieldDescriptor::enumeration("category"))
        .field(FieldDescriptor::enumeration("status"))
        .field(FieldDescriptor::number("quantity"))
        .field(FieldDescriptor::number("price"))
        .field(FieldDescriptor::date("purchase_date"))
        .field(FieldDescriptor::date("warranty_expiry"))
        .facet("category")
        .facet("status")
        .default_sort(SortSpec::asc("name"))
        .card(AggregateSpec::count_by("category").with_label("Items by category"))
        .card(AggregateSpec::count_by("status").with_label("Items by status"))
        .card(AggregateSpec::sum_by("category", "quantity").with_label("Units by category"))
}
