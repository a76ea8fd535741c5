//! Content encoding and path resolution properties

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use ghpub::publish::request::{effective_commit_message, effective_path};
use ghpub_github::encode_content;
use proptest::prelude::*;

#[test]
fn test_encode_known_values() {
    assert_eq!(encode_content(""), "");
    assert_eq!(encode_content("# Hello\n"), "IyBIZWxsbwo=");
    assert_eq!(encode_content("héllo"), "aMOpbGxv");
}

proptest! {
    #[test]
    fn encoded_content_decodes_to_utf8_bytes(text in "\\PC*") {
        let decoded = STANDARD.decode(encode_content(&text)).unwrap();
        prop_assert_eq!(decoded, text.as_bytes().to_vec());
    }

    #[test]
    fn directory_path_appends_file_name(dir in "[a-z]{1,8}(/[a-z]{1,8}){0,2}", name in "[a-z]{1,8}\\.md") {
        let path = effective_path(Some(&format!("{dir}/")), &name);
        prop_assert_eq!(path, format!("{dir}/{name}"));
    }

    #[test]
    fn default_commit_message_names_path(path in "[a-z/]{1,20}\\.md") {
        prop_assert_eq!(effective_commit_message(None, &path), format!("Publish: {path}"));
    }
}
