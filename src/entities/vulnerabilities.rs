//! Known vulnerabilities tracked against the inventory

use crate::core::aggregate::AggregateSpec;
use crate::core::field::FieldDescriptor;
use crate::core::query::SortSpec;
use crate::core::schema::EntitySchema;

pub const COLLECTION: &str = "vulnerabilities";

pub const SEVERITIES: &[&str] = &["critical", "high", "medium", "low"];
pub const STATUSES: &[&str] = &["open", "in_progress", "resolved"];

pub fn schema() -> EntitySchema {
    EntitySchema::new(COLLECTION, "vulnerability")
        .field(FieldDescriptor::text("cve_id").searchable())
        .field(FieldDescriptor::text("title").searchable())
        .field(FieldDescriptor::text("affected_product").searchable())
        .field(FieldDescriptor::enumeration("severity"))
        .field(FieldDescriptor::enumeration("status"))
        .field(FieldDescriptor::number("cvss_score"))
        .field(FieldDescriptor::number("affected_assets"))
        .field(FieldDescriptor::date("discovered_date"))
        .facet("severity")
        .facet("status")
        .default_sort(SortSpec::desc("cvss_score"))
        .card(AggregateSpec::count_by("severity").with_label("Severity histogram"))
        .card(AggregateSpec::count_by("status").with_label("Remediation status"))
        .card(AggregateSpec::sum_by("severity", "affected_assets").with_label("Assets at risk"))
}
