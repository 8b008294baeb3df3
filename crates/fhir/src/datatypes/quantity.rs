use crate::validation::ValidationError;
use fhir_types::{Code, Decimal, FhirString, Uri};

fhir_record! {
    /// A measured amount, optionally with a coded unit.
    datatype Quantity("Quantity") builder QuantityBuilder check quantity_rules {
        /// Numerical value (with implicit precision).
        optional value("value"): Decimal,
        /// < | <= | >= | > - how to understand the value
        optional comparator("comparator"): Code,
        /// Unit representation.
        optional unit("unit"): FhirString,
        optional system("system"): Uri,
        optional code("code"): Code,
    }
}

fhir_record! {
    /// A set of ordered quantities between a low and a high limit.
    datatype Range("Range") builder RangeBuilder check range_rules {
        optional low("low"): Quantity,
        optional high("high"): Quantity,
    }
}

/// qty-3: if a code for the unit is present, the system SHALL also be present.
fn quantity_rules(quantity: &Quantity) -> Result<(), ValidationError> {
    if quantity.code.is_some() && quantity.system.is_none() {
        return Err(ValidationError::invariant(
            Quantity::ELEMENT,
            "qty-3",
            "a unit code requires a system",
        ));
    }
    Ok(())
}

/// rng-2: if present, low SHALL have a lower value than high.
fn range_rules(range: &Range) -> Result<(), ValidationError> {
    let low = range.low.as_ref().and_then(|q| q.value.as_ref());
    let high = range.high.as_ref().and_then(|q| q.value.as_ref());
    if let (Some(low), Some(high)) = (low, high) {
        if low.to_f64() > high.to_f64() {
            return Err(ValidationError::invariant(
                Range::ELEMENT,
                "rng-2",
                format!("low {low} is greater than high {high}"),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::string;
    use crate::FhirError;

    fn qty(value: &str) -> Quantity {
        Quantity::builder()
            .value(Decimal::parse(value).expect("decimal"))
            .unit(string("page"))
            .build()
            .expect("valid quantity")
    }

    #[test]
    fn unit_code_needs_system() {
        let err = Quantity::builder()
            .value(Decimal::from(3))
            .code(Code::parse("mg").expect("code"))
            .build()
            .expect_err("code without system");
        assert!(matches!(
            err,
            FhirError::Validation(ValidationError::Invariant { key: "qty-3", .. })
        ));
    }

    #[test]
    fn range_bounds_are_ordered() {
        Range::builder()
            .low(qty("1"))
            .high(qty("10.5"))
            .build()
            .expect("valid range");

        let err = Range::builder()
            .low(qty("20"))
            .high(qty("3"))
            .build()
            .expect_err("inverted range");
        assert!(matches!(
            err,
            FhirError::Validation(ValidationError::Invariant { key: "rng-2", .. })
        ));
    }
}
