//! Async combinator behavior: the four input/mapper combinations, short
//! circuiting, panic propagation and cancellation.

use std::cell::Cell;
use std::time::Duration;
use verdict::definitions::{external, resource, validation};
use verdict::{Error, Outcome, OutcomeFuture, Success, SuccessKind};

async fn fetch(id: u32) -> Outcome<String> {
    tokio::task::yield_now().await;
    match id {
        1 => Outcome::ok_with("alpha".to_owned()),
        _ => resource::not_found().with_detail("id", id.to_string()).into(),
    }
}

async fn length_checked(name: String) -> Outcome<usize> {
    tokio::task::yield_now().await;
    if name.is_empty() {
        validation::required().into()
    } else {
        Outcome::created_with(name.len())
    }
}

// ============================================================================
// Sync input, async mapper
// ============================================================================

#[tokio::test]
async fn map_async_keeps_status() {
    let outcome = Outcome::success(Success::accepted_with(4).with_message("queued"))
        .map_async(async |x| x * 10)
        .await;

    let success = outcome.success_details();
    assert_eq!(success.kind(), SuccessKind::Accepted);
    assert_eq!(success.message().as_deref(), Some("queued"));
    assert_eq!(*success.value(), 40);
}

#[tokio::test]
async fn bind_async_adopts_inner_outcome() {
    let bound = Outcome::ok_with("alpha".to_owned()).bind_async(length_checked).await;
    assert_eq!(bound.success_kind(), Some(SuccessKind::Created));
    assert_eq!(bound.into_value(), 5);

    let rejected = Outcome::ok_with(String::new()).bind_async(length_checked).await;
    assert_eq!(rejected.error().code(), 4002);
}

#[tokio::test]
async fn match_async_awaits_one_handler() {
    let failed: Outcome<u32> = external::gateway_timeout().into();
    let described = failed
        .match_value_async(async |v| format!("value {v}"), async |e| format!("error {}", e.code()))
        .await;
    assert_eq!(described, "error 8003");

    let described = Outcome::created_with(3)
        .match_with_async(
            async |s: Success<i32>| format!("{} {}", s.kind(), s.value()),
            async |e: Error| e.to_string(),
        )
        .await;
    assert_eq!(described, "Created 3");
}

#[tokio::test]
async fn side_effects_do_not_change_outcome() {
    let seen = Cell::new(0u32);

    let ok = Outcome::ok_with(7)
        .tap_async(async |v: &i32| seen.set(*v as u32))
        .await
        .on_failure_async(async |_: &Error| seen.set(999))
        .await;
    assert_eq!(seen.get(), 7);
    assert_eq!(ok, Outcome::ok_with(7));

    let failed: Outcome<i32> = resource::locked().into();
    let failed = failed
        .tap_async(async |_: &i32| seen.set(0))
        .await
        .on_failure_async(async |e: &Error| seen.set(e.code()))
        .await;
    assert_eq!(seen.get(), 5005);
    assert!(failed.is_failure());
}

#[tokio::test]
async fn failure_handlers() {
    let failed: Outcome<u32> = resource::not_found().into();
    let remapped = failed
        .map_error_async(async |e: Error| e.with_detail("retry", "later"))
        .await;
    assert_eq!(remapped.error().details()[0].context(), "retry");

    let fallback = remapped.value_or_else_async(async |e| e.code()).await;
    assert_eq!(fallback, 5001);
}

#[tokio::test]
async fn map_success_async_replaces_status() {
    let promoted = Outcome::ok_with(2)
        .map_success_async(async |x| Success::created_with(x + 1).with_message("made"))
        .await;
    let success = promoted.success_details();
    assert_eq!(success.kind(), SuccessKind::Created);
    assert_eq!(success.message().as_deref(), Some("made"));
    assert_eq!(*success.value(), 3);

    let failed: Outcome<i32> = resource::gone().into();
    let failed = failed.map_success_async(async |x| Success::created_with(x)).await;
    assert_eq!(failed.error().code(), 5004);
}

#[tokio::test]
async fn ensure_async_boundary() {
    let kept = Outcome::ok_with(5)
        .ensure_async(async |x: &i32| *x > 0, validation::out_of_range())
        .await;
    assert_eq!(kept, Outcome::ok_with(5));

    let rejected = Outcome::ok_with(5)
        .ensure_async(async |x: &i32| *x > 10, validation::out_of_range())
        .await;
    assert_eq!(rejected.error().code(), 4004);
}

// ============================================================================
// Async input
// ============================================================================

#[tokio::test]
async fn pending_outcome_with_sync_mappers() {
    let len = fetch(1)
        .map(|name| name.len())
        .ensure(|len| *len > 3, validation::too_short())
        .map_success(Success::no_content_with)
        .await;
    assert_eq!(len.success_kind(), Some(SuccessKind::NoContent));
    assert_eq!(len.into_value(), 5);

    let fallback = fetch(2).map(|name| name.len()).value_or(0).await;
    assert_eq!(fallback, 0);

    let promoted = fetch(1).with_value(()).await;
    assert_eq!(promoted, Outcome::ok());
}

#[tokio::test]
async fn pending_outcome_matches_with_sync_handlers() {
    let described = fetch(1)
        .match_with(|s| format!("{} {}", s.kind(), s.value()), |e| e.to_string())
        .await;
    assert_eq!(described, "Ok alpha");

    let described = fetch(4).match_value(|name| name, |e| format!("missing {}", e.code())).await;
    assert_eq!(described, "missing 5001");
}

#[tokio::test]
async fn pending_outcome_side_effects_with_sync_handlers() {
    let seen = Cell::new(None);

    let ok = fetch(1).tap(|name| seen.set(Some(name.len()))).await;
    assert_eq!(seen.get(), Some(5));
    assert_eq!(ok.into_value(), "alpha");

    seen.set(None);
    let failed = fetch(2)
        .tap(|name| seen.set(Some(name.len())))
        .map_error(|e| e.with_detail("source", "cache"))
        .await;
    assert_eq!(seen.get(), None);
    let details = failed.error().details();
    assert_eq!(details.len(), 2);
    assert_eq!(details[1].context(), "source");
}

#[tokio::test]
async fn pending_outcome_map_success_async() {
    let promoted = fetch(1)
        .map_success_async(async |name| Success::accepted_with(name.to_uppercase()))
        .await;
    assert_eq!(promoted.success_kind(), Some(SuccessKind::Accepted));
    assert_eq!(promoted.into_value(), "ALPHA");

    let missing = fetch(5)
        .map_success_async(async |name| Success::accepted_with(name))
        .await;
    assert_eq!(missing.error().code(), 5001);
}

#[tokio::test]
async fn pending_outcome_ensure_async() {
    let kept = fetch(1)
        .ensure_async(async |name: &String| name.starts_with('a'), validation::invalid_format())
        .await;
    assert_eq!(kept.into_value(), "alpha");

    let rejected = fetch(1)
        .ensure_async(async |name: &String| name.len() > 10, validation::too_short())
        .await;
    assert!(validation::TOO_SHORT.matches(rejected.error()));

    let untouched = fetch(6)
        .ensure_async(async |_: &String| true, validation::too_short())
        .await;
    assert_eq!(untouched.error().code(), 5001);
}

#[tokio::test]
async fn pending_outcome_match_async() {
    let described = fetch(1)
        .match_with_async(
            async |s: Success<String>| format!("{} {}", s.code(), s.value()),
            async |e: Error| e.to_string(),
        )
        .await;
    assert_eq!(described, "100 alpha");

    let described = fetch(7)
        .match_value_async(async |name: String| name, async |e: Error| format!("missing {}", e.code()))
        .await;
    assert_eq!(described, "missing 5001");
}

#[tokio::test]
async fn pending_outcome_failure_handlers_async() {
    let seen = Cell::new(0u32);

    let failed = fetch(8)
        .on_failure_async(async |e: &Error| seen.set(e.code()))
        .map_error_async(async |e: Error| e.with_detail("retry", "never"))
        .await;
    assert_eq!(seen.get(), 5001);
    assert_eq!(failed.error().details()[1].message(), "never");

    let fallback = fetch(8)
        .value_or_else_async(async |e: Error| format!("fallback {}", e.code()))
        .await;
    assert_eq!(fallback, "fallback 5001");

    seen.set(0);
    let kept = fetch(1)
        .on_failure_async(async |e: &Error| seen.set(e.code()))
        .map_error_async(async |e: Error| e.with_detail("retry", "never"))
        .value_or_else_async(async |_: Error| String::new())
        .await;
    assert_eq!(seen.get(), 0);
    assert_eq!(kept, "alpha");
}

#[tokio::test]
async fn pending_outcome_with_async_mappers() {
    let len = fetch(1).bind_async(length_checked).map_async(async |n| n * 2).await;
    assert_eq!(len.into_value(), 10);

    let missing = fetch(9)
        .bind_async(length_checked)
        .on_failure(|e| assert_eq!(e.details()[0].message(), "9"))
        .value_or_default()
        .await;
    assert_eq!(missing, 0);
}

#[tokio::test]
async fn failed_input_never_invokes_async_mapper() {
    let invoked = Cell::new(false);

    let outcome = fetch(3)
        .map_async(async |name| {
            invoked.set(true);
            name
        })
        .bind_async(async |name| {
            invoked.set(true);
            Outcome::ok_with(name)
        })
        .tap_async(async |_: &String| invoked.set(true))
        .await;

    assert!(!invoked.get());
    assert_eq!(outcome.error().code(), 5001);
}

// ============================================================================
// Panics and cancellation
// ============================================================================

#[tokio::test]
#[should_panic(expected = "mapper exploded")]
async fn mapper_panic_propagates() {
    let _ = Outcome::ok_with(1)
        .map_async(async |_: i32| -> i32 { panic!("mapper exploded") })
        .await;
}

#[tokio::test]
async fn spawned_panic_surfaces_as_join_error() {
    let handle = tokio::spawn(async {
        Outcome::ok_with(1)
            .map_async(async |_: i32| -> i32 { panic!("inside task") })
            .await
    });
    let joined = handle.await;
    assert!(joined.is_err_and(|e| e.is_panic()));
}

#[tokio::test]
async fn dropping_the_future_cancels_later_steps() {
    let reached = Cell::new(false);

    let chain = Outcome::ok_with(1)
        .map_async(async |x: i32| {
            tokio::time::sleep(Duration::from_secs(30)).await;
            x
        })
        .tap(|_| reached.set(true));

    let timed_out = tokio::time::timeout(Duration::from_millis(20), chain).await;
    assert!(timed_out.is_err());
    assert!(!reached.get());
}
