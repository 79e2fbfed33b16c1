//! Async pipeline: chaining awaited steps with sync and async mappers, and
//! tracing failures on the way out.
//!
//! Run with: cargo run --example async_pipeline

use std::time::Duration;
use verdict::definitions::{external, resource, validation};
use verdict::{Outcome, OutcomeFuture, Success};

#[derive(Debug)]
struct Order {
    id: u32,
    total_cents: u64,
}

async fn load_order(id: u32) -> Outcome<Order> {
    tokio::time::sleep(Duration::from_millis(5)).await;
    match id {
        0 => resource::not_found().with_detail("order", id.to_string()).into(),
        _ => Outcome::ok_with(Order {
            id,
            total_cents: u64::from(id) * 1250,
        }),
    }
}

async fn charge(order: Order) -> Outcome<String> {
    tokio::time::sleep(Duration::from_millis(5)).await;
    if order.total_cents > 10_000 {
        external::rejected()
            .with_message("card issuer declined the charge")
            .with_detail("order", order.id.to_string())
            .into()
    } else {
        Outcome::success(Success::accepted_with(format!("receipt-{}", order.id)))
    }
}

async fn checkout(id: u32) -> Outcome<String> {
    load_order(id)
        .ensure(|order| order.total_cents > 0, validation::invalid_value())
        .bind_async(charge)
        .map_async(async |receipt| {
            tokio::time::sleep(Duration::from_millis(1)).await;
            receipt.to_uppercase()
        })
        .await
        .trace_failure("checkout")
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt().with_target(false).init();

    for id in [1, 0, 9] {
        let summary = checkout(id)
            .await
            .match_with(
                |success| format!("order {id}: {} ({})", success.value(), success.kind()),
                |err| format!("order {id}: {err}"),
            );
        println!("{summary}");
    }

    let receipt = checkout(0).value_or_else(|err| format!("no receipt (E-{})", err.code())).await;
    println!("{receipt}");
}
