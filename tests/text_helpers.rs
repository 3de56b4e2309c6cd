use utilkit::{json, strings, time, uuid};

#[test]
fn slug_and_case_helpers_agree_on_word_boundaries() {
    let input = "Hello, World 2024";
    assert_eq!(strings::slugify(input), "hello-world-2024");
    assert_eq!(strings::snake_case(input), "hello_world_2024");
    assert_eq!(strings::kebab_case(input), "hello-world-2024");
}

#[test]
fn config_file_with_comments_becomes_valid_json() {
    let raw = r#"
        {
            // service name
            "name": "api", /* inline */
            "url": "http://example.com"
        }
    "#;

    let cleaned = json::strip_comments(raw);
    assert!(json::is_valid(&cleaned), "{}", cleaned);
    assert_eq!(
        json::compact(&cleaned),
        r#"{"name":"api","url":"http://example.com"}"#
    );
}

#[test]
fn parsed_time_round_trips_through_unix_seconds() {
    let t = time::parse(time::DATETIME_FORMAT, "2024-03-09 07:05:03").unwrap();
    let secs = time::to_unix_seconds(&t);
    assert_eq!(time::from_unix(secs), Some(t));
    assert_eq!(time::format_rfc3339(&t), "2024-03-09T07:05:03Z");
}

#[test]
fn generated_uuid_parses_back_to_same_text() {
    let id = uuid::generate();
    let bytes = uuid::parse(&id).unwrap();
    assert_eq!(uuid::format(bytes), id);
}
