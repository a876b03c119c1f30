use libroster_core::{BookDto, PlayerDto};

#[test]
fn book_dto_round_trips_through_json() {
    let json = r#"{
        "isbn": "9781484200773",
        "title": "Pro Git",
        "subtitle": null,
        "author": "Scott Chacon and Ben Straub",
        "publisher": "Apress",
        "published": "2014-11-18",
        "pages": 458,
        "description": "Your fully-updated guide to Git.",
        "website": "https://git-scm.com/book/en/v2"
    }"#;

    let dto: BookDto = serde_json::from_str(json).unwrap();
    assert_eq!(dto.isbn.as_deref(), Some("9781484200773"));
    assert_eq!(dto.subtitle, None);
    assert_eq!(dto.pages, Some(458));

    let encoded = serde_json::to_string(&dto).unwrap();
    let decoded: BookDto = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, dto);
}

#[test]
fn partial_player_payload_decodes_with_absent_fields() {
    // Structural permissiveness: any subset of fields decodes; only
    // validation decides acceptability.
    let json = r#"{"first_name": "Lionel", "squad_number": 10}"#;
    let dto: PlayerDto = serde_json::from_str(json).unwrap();
    assert_eq!(dto.first_name.as_deref(), Some("Lionel"));
    assert_eq!(dto.squad_number, Some(10));
    assert_eq!(dto.last_name, None);
    assert!(dto.try_into_entity().is_err());
}
