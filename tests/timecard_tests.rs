//! Week-document workflows through the public timecard API.

use hours::errors::AppError;
use hours::timecard::{find_day_summary, parse_spans, parse_ymd, patch_day};
use serde_json::{Value, json};

fn portal_week() -> Value {
    let days: Vec<Value> = (16..=22)
        .map(|d| {
            json!({
                "workedDate": format!("02/{d}/2026"),
                "didNotWork": false,
                "timeEntrySpanDtos": null,
                "timeEntry": null,
                "hoursWorked": 0,
                "unknownPortalField": {"nested": [1, 2, 3]}
            })
        })
        .collect();

    json!({
        "engagementId": 12345678,
        "timecardTemplateId": 4,
        "statusCode": "DRAFT",
        "billingItemDetails": days
    })
}

#[test]
fn set_then_overwrite_then_mark_not_worked() {
    let target = parse_ymd("2026-02-18").unwrap();
    let week = portal_week();

    let first = parse_spans(&["labor:09:00-17:00"]).unwrap();
    let (week1, change1) = patch_day(&week, target, &first, false).unwrap();
    assert!(!change1.had_existing);

    let second = parse_spans(&["labor:08:00-12:00", "lunch:12:00-13:00", "labor:13:00-16:00"]).unwrap();
    let (week2, change2) = patch_day(&week1, target, &second, false).unwrap();
    assert!(change2.had_existing);
    assert_eq!(change2.existing, change1.proposed);
    assert_eq!(find_day_summary(&week2, target).unwrap(), change2.proposed);
    assert_eq!(change2.proposed.labor_hours(), 7.0);

    let (week3, change3) = patch_day(&week2, target, &[], true).unwrap();
    assert!(change3.had_existing);
    assert!(change3.proposed.did_not_work);
    assert!(change3.proposed.spans.is_empty());
    assert!(week3["billingItemDetails"][2]["timeEntrySpanDtos"].is_null());
    assert_eq!(week3["billingItemDetails"][2]["timeEntry"]["noBreakTaken"], false);
}

#[test]
fn unrelated_content_survives_patching() {
    let target = parse_ymd("2026-02-22").unwrap();
    let week = portal_week();
    let spans = parse_spans(&["labor:10:00-14:00"]).unwrap();

    let (patched, _) = patch_day(&week, target, &spans, false).unwrap();

    for idx in 0..6 {
        assert_eq!(patched["billingItemDetails"][idx], week["billingItemDetails"][idx]);
    }
    let sunday = &patched["billingItemDetails"][6];
    assert_eq!(sunday["unknownPortalField"], json!({"nested": [1, 2, 3]}));
    assert_eq!(sunday["timeEntry"]["noBreakTaken"], true);
    assert_eq!(patched["statusCode"], "DRAFT");

    // Sunday belongs to the week that started the previous Monday
    assert_eq!(patched["selectedDate"], "02/16/2026");
    assert_eq!(patched["selectedEndDate"], "02/22/2026");
    assert_eq!(patched["periodEndDate"], "02/22/2026");
    assert_eq!(patched["requisitionId"], 12345678);
}

#[test]
fn date_outside_fetched_week_is_reported() {
    let week = portal_week();
    let next_monday = parse_ymd("2026-02-23").unwrap();

    let err = patch_day(&week, next_monday, &[], true).unwrap_err();
    assert!(matches!(err, AppError::DateNotFound(ref d) if d == "02/23/2026"));
    assert!(matches!(
        find_day_summary(&week, next_monday),
        Err(AppError::DateNotFound(_))
    ));
}
