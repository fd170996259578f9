use json_composer::{
    entries, kv, logstash, provider::arguments::ArgumentsProvider, raw_json, FieldNames,
    JsonEncoder, Level, LogEvent,
};

fn main() {
    let encoder = logstash::encoder();
    let mut stdout = std::io::stdout();

    let event = LogEvent::new(Level::Info, "demo::checkout", "order accepted")
        .with_argument(kv("order_id", 4127))
        .with_argument(entries([("currency", "EUR"), ("country", "NL")]))
        .with_mdc_entry("request_id", "9b2f");
    encoder.encode(&event, &mut stdout).unwrap();

    let event = LogEvent::new(Level::Warn, "demo::payments", "retrying capture")
        .with_argument(raw_json("attempts", "[1,2,3]"));
    encoder.encode(&event, &mut stdout).unwrap();

    println!();

    let wrapped = logstash::encoder_with_names(FieldNames {
        arguments: Some("args".to_owned()),
        mdc: Some("mdc".to_owned()),
        ..FieldNames::default()
    });
    encoder_demo_line(&wrapped, &mut stdout);

    let custom = JsonEncoder::builder()
        .with_level("severity")
        .with_message("msg")
        .with_arguments(
            ArgumentsProvider::new()
                .with_non_structured_arguments(true)
                .with_fields_mapping(r#"{"arg1":"attempt"}"#),
        )
        .build();
    encoder_demo_line(&custom, &mut stdout);
}

fn encoder_demo_line(encoder: &JsonEncoder, stdout: &mut std::io::Stdout) {
    let event = LogEvent::new(Level::Error, "demo::payments", "capture failed")
        .with_argument(kv("order_id", 4127))
        .with_argument(3)
        .with_mdc_entry("request_id", "9b2f");
    encoder.encode(&event, stdout).unwrap();
}
