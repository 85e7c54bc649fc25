//! BDD step definitions for configuring scripted endpoints

use std::time::Duration;

use cucumber::{given, then};

use crate::scripted_client::Reply;
use crate::world::PingerWorld;

fn add_endpoint(
    world: &mut PingerWorld,
    url: &str,
    replies: Vec<Reply>,
    fallback: Reply,
    delay: Duration,
) {
    world.client.script(url, replies, fallback, delay);
    world.endpoints.push(url.to_string());
}

#[given("no configured endpoints")]
fn no_endpoints(world: &mut PingerWorld) {
    world.endpoints.clear();
}

#[given(expr = "an endpoint {string} that responds with status {int} and body {string}")]
fn endpoint_responds(world: &mut PingerWorld, url: String, status: u16, body: String) {
    add_endpoint(
        world,
        &url,
        Vec::new(),
        Reply::Status { status, body },
        Duration::ZERO,
    );
}

#[given(expr = "an endpoint {string} that responds with status {int} after {int} milliseconds")]
fn endpoint_responds_slowly(world: &mut PingerWorld, url: String, status: u16, millis: u64) {
    add_endpoint(
        world,
        &url,
        Vec::new(),
        Reply::Status {
            status,
            body: String::new(),
        },
        Duration::from_millis(millis),
    );
}

#[given(
    expr = "an endpoint {string} that refuses {int} connections then responds with status {int} and body {string}"
)]
fn endpoint_recovers(
    world: &mut PingerWorld,
    url: String,
    refusals: usize,
    status: u16,
    body: String,
) {
    add_endpoint(
        world,
        &url,
        vec![Reply::Refused; refusals],
        Reply::Status { status, body },
        Duration::ZERO,
    );
}

#[given(expr = "an endpoint {string} that refuses every connection")]
fn endpoint_refuses(world: &mut PingerWorld, url: String) {
    add_endpoint(world, &url, Vec::new(), Reply::Refused, Duration::ZERO);
}

#[given(expr = "an endpoint {string} that never responds")]
fn endpoint_stalls(world: &mut PingerWorld, url: String) {
    add_endpoint(world, &url, Vec::new(), Reply::Stall, Duration::ZERO);
}

#[then(expr = "{string} should have received {int} request(s)")]
fn endpoint_received(world: &mut PingerWorld, url: String, count: usize) {
    assert_eq!(
        world.client.request_count(&url),
        count,
        "unexpected request count for {}",
        url
    );
}
