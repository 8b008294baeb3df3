use crate::validation::ValidationError;
use fhir_types::{Base64Binary, Code, DateTime, FhirString, Uri};

fhir_record! {
    /// Content in a format defined elsewhere, either inline (`data`) or by `url`.
    datatype Attachment("Attachment") builder AttachmentBuilder check attachment_rules {
        /// Mime type of the content, with charset etc.
        optional content_type("contentType"): Code,
        optional language("language"): Code,
        /// Data inline, base64ed.
        optional data("data"): Base64Binary,
        optional url("url"): Uri,
        /// Number of bytes of content (if url provided).
        optional size("size"): u32,
        /// Hash of the data (sha-1, base64ed).
        optional hash("hash"): Base64Binary,
        optional title("title"): FhirString,
        optional creation("creation"): DateTime,
    }
}

/// att-1: if the Attachment has data, it SHALL have a contentType.
fn attachment_rules(attachment: &Attachment) -> Result<(), ValidationError> {
    if attachment.data.is_some() && attachment.content_type.is_none() {
        return Err(ValidationError::invariant(
            Attachment::ELEMENT,
            "att-1",
            "inline data requires a contentType",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::string;
    use crate::FhirError;

    #[test]
    fn inline_data_needs_content_type() {
        let data = Base64Binary::from_bytes(b"%PDF-1.7");
        let err = Attachment::builder()
            .data(data.clone())
            .build()
            .expect_err("missing contentType");
        assert!(matches!(
            err,
            FhirError::Validation(ValidationError::Invariant { key: "att-1", .. })
        ));

        let pdf = Attachment::builder()
            .content_type(Code::parse("application/pdf").expect("code"))
            .data(data)
            .title(string("Full text"))
            .build()
            .expect("valid attachment");
        assert_eq!(pdf.data().map(Base64Binary::decode), Some(b"%PDF-1.7".to_vec()));
    }

    #[test]
    fn url_only_attachment_is_valid() {
        let linked = Attachment::builder()
            .url(Uri::parse("https://example.org/article.pdf").expect("uri"))
            .size(1024u32)
            .build()
            .expect("valid attachment");
        assert_eq!(linked.size(), Some(&1024));
    }

    #[test]
    fn content_hash_survives_round_trip() {
        let digest = Base64Binary::parse("2jmj7l5rSw0yVb/vlWAYkK/YBwk=").expect("sha-1");
        let attachment = Attachment::builder()
            .url(Uri::parse("https://example.org/article.pdf").expect("uri"))
            .hash(digest.clone())
            .build()
            .expect("valid attachment");
        assert_eq!(attachment.hash(), Some(&digest));

        let copy = attachment.to_builder().build().expect("rebuild");
        assert_eq!(copy, attachment);
        assert_eq!(copy.hash_code(), attachment.hash_code());

        let other = copy
            .to_builder()
            .hash(Base64Binary::from_bytes(b"other"))
            .build()
            .expect("rebuild");
        assert_ne!(other, attachment);
    }
}
