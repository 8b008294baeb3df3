use super::Coding;
use fhir_types::{DateTime, Id, Uri};

fhir_record! {
    /// Metadata about a resource, maintained by the infrastructure.
    datatype Meta("Meta") builder MetaBuilder {
        optional version_id("versionId"): Id,
        /// When the resource version last changed.
        optional last_updated("lastUpdated"): DateTime,
        /// Identifies where the resource comes from.
        optional source("source"): Uri,
        /// Profiles this resource claims to conform to.
        list profile + add_profile("profile"): Uri,
        list security + add_security("security"): Coding,
        list tag + add_tag("tag"): Coding,
    }
}
