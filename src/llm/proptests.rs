//! Property-based tests for the attachment forwarding policy
//!
//! These verify that request assembly preserves its key invariants for
//! arbitrary MIME types and payloads:
//! - The question text is always the first content part
//! - `image/*` and `application/pdf` payloads always become inline data
//! - Every other MIME type is downgraded: no inline data, note appended
//! - Inline payload bytes survive assembly unmodified

use super::client::AnswerClient;
use super::types::{AttachmentData, ContentPart};
use proptest::prelude::*;

/// MIME types the backend can analyze
fn arb_supported_mime() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z0-9.+-]{1,20}".prop_map(|sub| format!("image/{sub}")),
        Just("application/pdf".to_string()),
    ]
}

/// MIME types outside the capability boundary
fn arb_unsupported_mime() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("application/zip".to_string()),
        Just("application/msword".to_string()),
        Just("text/plain".to_string()),
        Just("audio/mpeg".to_string()),
        Just("video/mp4".to_string()),
        "[a-z]{2,10}/[a-z0-9.+-]{1,20}".prop_filter("must not be analyzable", |mime| {
            !mime.starts_with("image/") && mime != "application/pdf"
        }),
    ]
}

fn arb_question() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ?.!,]{1,80}"
}

proptest! {
    #[test]
    fn question_is_always_the_first_part(
        question in arb_question(),
        mime in prop_oneof![arb_supported_mime(), arb_unsupported_mime()],
        bytes in proptest::collection::vec(any::<u8>(), 0..64),
    ) {
        let attachment = AttachmentData::new(bytes, mime);
        let request = AnswerClient::build_request(&question, "ctx", Some(&attachment));

        prop_assert_eq!(&request.parts[0], &ContentPart::text(question));
    }

    #[test]
    fn supported_attachments_become_inline_data(
        question in arb_question(),
        mime in arb_supported_mime(),
        bytes in proptest::collection::vec(any::<u8>(), 0..64),
    ) {
        let attachment = AttachmentData::new(bytes.clone(), mime.clone());
        let request = AnswerClient::build_request(&question, "ctx", Some(&attachment));

        prop_assert_eq!(request.parts.len(), 2);
        match &request.parts[1] {
            ContentPart::InlineData { mime_type, data } => {
                prop_assert_eq!(mime_type, &mime);
                prop_assert_eq!(data, &bytes);
            }
            other => prop_assert!(false, "expected inline data, got {:?}", other),
        }
    }

    #[test]
    fn unsupported_attachments_are_downgraded(
        question in arb_question(),
        mime in arb_unsupported_mime(),
        bytes in proptest::collection::vec(any::<u8>(), 0..64),
    ) {
        let attachment = AttachmentData::new(bytes, mime);
        let request = AnswerClient::build_request(&question, "ctx", Some(&attachment));

        prop_assert!(!request.has_inline_data());
        prop_assert_eq!(request.parts.len(), 2);
        match &request.parts[1] {
            ContentPart::Text { text } => prop_assert!(text.contains("not an image or PDF")),
            other => prop_assert!(false, "expected downgrade note, got {:?}", other),
        }
    }

    #[test]
    fn no_attachment_means_a_single_text_part(question in arb_question()) {
        let request = AnswerClient::build_request(&question, "ctx", None);
        prop_assert_eq!(request.parts.len(), 1);
        prop_assert!(!request.has_inline_data());
    }
}
