use contact_scrape::*;

fn accept_all() -> PhoneScanner {
    PhoneScanner::new().with_plan(|_: &str| true)
}

// --- scrape_phone_numbers ---

#[test]
fn test_mixed_formats() {
    let text = "Call (555) 123-4567 or 555.987.6543 today";
    assert_eq!(accept_all().scrape(text), vec!["5551234567", "5559876543"]);
}

#[test]
fn test_numbering_plan_filters_unassignable() {
    // 123 is not a valid exchange, 555 is not an assigned area code
    let text = "Call (212) 123-4567 or 212.987.6543 or 555.987.6543 today";
    assert_eq!(scrape_phone_numbers(text), vec!["2129876543"]);
}

#[test]
fn test_short_groups_never_match() {
    assert!(accept_all().scrape("12-34-56 and 1.2.3 and 10.20.30").is_empty());
}

#[test]
fn test_tel_href() {
    let html = r#"<a href="tel:+15551234567">Call</a>"#;
    assert!(accept_all().scrape(html).contains(&"5551234567".to_string()));

    let html = r#"<a href="tel:+12125550199">Call</a>"#;
    assert_eq!(scrape_phone_numbers(html), vec!["2125550199"]);
}

#[test]
fn test_callto_href_case_insensitive() {
    let html = r#"<a href="CALLTO:(212) 555 0199">Skype</a>"#;
    assert_eq!(scrape_phone_numbers(html), vec!["2125550199"]);
}

#[test]
fn test_no_anchor_gives_empty() {
    assert!(scrape_phone_numbers("no numbers here").is_empty());
    assert!(scrape_phone_numbers("5552345678").is_empty());
    assert!(scrape_phone_numbers("").is_empty());
}

#[test]
fn test_only_separators_terminates() {
    assert!(scrape_phone_numbers("-----.....-.-.-.").is_empty());
    assert!(scrape_phone_numbers(&"-".repeat(1000)).is_empty());
}

#[test]
fn test_parenthesized_shapes() {
    let scanner = accept_all();
    assert_eq!(scanner.scrape("(555)-234-5678"), vec!["5552345678"]);
    assert_eq!(scanner.scrape("(555)234-5678"), vec!["5552345678"]);
    assert_eq!(scanner.scrape("x (555) 234.5678"), vec!["5552345678"]);
}

#[test]
fn test_country_code_removed() {
    assert_eq!(
        scrape_phone_numbers("Phone: +1 212-555-0199"),
        vec!["2125550199"]
    );
}

#[test]
fn test_deduplicated_and_sorted() {
    let text = "212.987.6543 or 212-555-0199 or 212.555.0199";
    assert_eq!(
        scrape_phone_numbers(text),
        vec!["2125550199", "2129876543"]
    );
}

#[test]
fn test_fixed_stride_after_each_separator() {
    // the leading '-' swallows the separator between 555 and 987
    assert!(accept_all().scrape("+1-555-987-6543").is_empty());
}

#[test]
fn test_combined_with_entities_text() {
    let text = "Call me at (212) 555-0199 or +1 212-987-6543";
    assert_eq!(
        scrape_phone_numbers(text),
        vec!["2125550199", "2129876543"]
    );
}

#[test]
fn test_never_panics() {
    let inputs = [
        "(((((-)))))",
        "-",
        ".",
        "5-",
        "-5",
        "(-",
        ")-",
        "1234-",
        "a-(",
        "é-ü.ñ",
        "href=\"",
        "href=\"tel:",
        "href=\"tel:5552345678",
        "+1+1+1",
        "(555) 234-",
        "🔢📱☎️-555-234-5678",
    ];
    for input in inputs {
        for strategy in [ScanStrategy::Heuristic, ScanStrategy::Pattern] {
            let numbers = accept_all().with_strategy(strategy).scrape(input);
            assert!(numbers.iter().all(|n| n.len() == 10));
        }
    }
}

// --- detectors ---

#[test]
fn test_find_by_separator() {
    assert_eq!(
        find_by_separator("call 555.234.5678 now", '.'),
        vec!["5552345678"]
    );
    assert!(find_by_separator("call 555.234.5678 now", '-').is_empty());
}

#[test]
fn test_find_by_href_requires_ten_digits_and_closing_quote() {
    assert!(find_by_href(r#"href="tel:555""#).is_empty());
    assert!(find_by_href(r#"href="tel:5552345678"#).is_empty());
    assert!(find_by_href(r#"href="https://example.com/5552345678""#).is_empty());
    assert_eq!(
        find_by_href(r#"<a href="/x"></a><a href="tel:555-234-5678">"#),
        vec!["5552345678"]
    );
}

// --- strategies ---

#[test]
fn test_pattern_strategy() {
    let scanner = accept_all().with_strategy(ScanStrategy::Pattern);
    let text = "Call (555) 123-4567 or 555.987.6543 today";
    assert_eq!(scanner.scrape(text), vec!["5551234567", "5559876543"]);

    let html = r#"<a href="tel:+15551234567">Call</a>"#;
    assert_eq!(scanner.scrape(html), vec!["5551234567"]);

    assert!(scanner.scrape("12-34-56").is_empty());
    assert!(scanner.scrape("-----").is_empty());
}

#[test]
fn test_mixed_separators_rejected_by_both_strategies() {
    for strategy in [ScanStrategy::Heuristic, ScanStrategy::Pattern] {
        let scanner = accept_all().with_strategy(strategy);
        assert!(scanner.scrape("(555).234-5678").is_empty());
        assert!(scanner.scrape("(555)-234.5678").is_empty());
        assert_eq!(scanner.scrape("(555).234.5678"), vec!["5552345678"]);
        assert_eq!(scanner.scrape("(555) 234.5678"), vec!["5552345678"]);
    }
}

#[test]
fn test_without_validation() {
    let scanner = PhoneScanner::new().without_validation();
    assert_eq!(scanner.scrape("(555) 123-4567"), vec!["5551234567"]);
}

// --- NanpPlan ---

#[test]
fn test_nanp_plan_accepts_assigned_numbers() {
    let plan = NanpPlan;
    assert!(plan.is_valid("2125550199"));
    assert!(plan.is_valid("2129876543"));
}

#[test]
fn test_nanp_plan_rejects_unassigned_area_codes() {
    let plan = NanpPlan;
    for number in ["5552345678", "2222345678", "3732345678"] {
        assert!(!plan.is_valid(number), "{number} should be rejected");
    }
}

#[test]
fn test_nanp_plan_rejects_malformed() {
    let plan = NanpPlan;
    assert!(!plan.is_valid("2121234567"));
    assert!(!plan.is_valid("1552345678"));
    assert!(!plan.is_valid("212555019"));
    assert!(!plan.is_valid("21255501a9"));
    assert!(!plan.is_valid("٢١٢٥٥٥٠١٩٩"));
}

#[test]
fn test_default_scanner_drops_unassigned_area_codes() {
    let text = "555-234-5678 or 212-555-0199";
    assert_eq!(scrape_phone_numbers(text), vec!["2125550199"]);
    assert_eq!(accept_all().scrape(text), vec!["2125550199", "5552345678"]);
}
