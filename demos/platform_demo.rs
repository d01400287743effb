//! Platform collaborator demo
//!
//! Exercises the scripted platform doubles without spinning up the full
//! screen: permission dialog scripting, provider outage handling, trace
//! replay, and the fix formatters. Run with:
//!
//! ```bash
//! cargo run --example platform_demo
//! ```

use campus_map::{
    event_channel, CsvFormatter, EventReceiver, FixFormatter, JsonFormatter, LatLng,
    LocationCapability, LocationProvider, LocationSample, LocationSessionController,
    LocationUpdateConfig, MockLocationProvider, MockPermissionService, PermissionGate,
    PlatformError, PlatformEvent, ReplayLocationProvider, TextFormatter,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("Campus Map Platform Collaborator Demo");
    println!("=====================================\n");

    demo_permission_scripting()?;
    demo_provider_outages()?;
    demo_trace_replay()?;
    demo_formatters()?;

    println!("All demos completed successfully!");
    Ok(())
}

/// Feed any queued permission results into the gate
fn drain_permission_results(rx: &EventReceiver, gate: &mut PermissionGate) {
    while let Ok(event) = rx.try_recv() {
        if let PlatformEvent::PermissionResult { response } = event {
            gate.on_permission_result(response);
        }
    }
}

fn demo_permission_scripting() -> Result<(), Box<dyn std::error::Error>> {
    println!("--- Permission Scripting Demo ---");

    let (tx, rx) = event_channel();
    let service = MockPermissionService::new(tx);
    let mut gate = PermissionGate::new(Box::new(service.clone()));

    println!("Initial state: {:?}", gate.state());

    // First attempt: the user backs out of the dialog without choosing
    gate.request_permission_if_needed();
    service.dismiss();
    drain_permission_results(&rx, &mut gate);
    println!("After dismissed dialog: {:?}", gate.state());

    // Second attempt: the user denies outright
    gate.request_permission_if_needed();
    service.respond(false);
    drain_permission_results(&rx, &mut gate);
    println!("After denial: {:?}", gate.state());

    // Third attempt: the user grants
    gate.request_permission_if_needed();
    service.respond(true);
    drain_permission_results(&rx, &mut gate);
    println!("After grant: {:?}", gate.state());
    println!(
        "Gate now reports permission: {}",
        gate.has_location_permission()
    );

    println!("Dialog requests issued:");
    for (code, capabilities) in service.request_log() {
        let names: Vec<String> = capabilities.iter().map(|c| c.to_string()).collect();
        println!("  code {} asking for [{}]", code, names.join(", "));
    }

    println!("Permission scripting demo completed\n");
    Ok(())
}

fn demo_provider_outages() -> Result<(), Box<dyn std::error::Error>> {
    println!("--- Provider Outage Demo ---");

    let (tx, rx) = event_channel();
    let provider = MockLocationProvider::new(tx.clone());
    provider.set_last_known(Some(LocationSample::new(
        LatLng::new(36.31959, 127.36597),
        1_000,
    )));

    // Clones share the scripted state, so one drives and one observes
    let mut probe = provider.clone();

    match probe.last_known_fix() {
        Ok(Some(fix)) => println!("✓ Cached fix served: {}", TextFormatter.format(&fix)),
        Ok(None) => println!("✓ Provider has no cached fix"),
        Err(e) => println!("✗ Unexpected failure: {}", e),
    }

    provider.simulate_outages(true, 1.0);
    match probe.last_known_fix() {
        Ok(_) => println!("✗ Outage did not trigger"),
        Err(PlatformError::ProviderUnavailable { reason }) => {
            println!("✓ Outage surfaced as expected: {}", reason)
        }
        Err(e) => println!("✗ Unexpected error kind: {}", e),
    }
    provider.simulate_outages(false, 0.0);

    provider.set_permission_granted(false);
    match probe.last_known_fix() {
        Err(PlatformError::PermissionDenied { capability }) => {
            println!("✓ Provider enforces permission ({} access)", capability)
        }
        other => println!("✗ Expected permission enforcement, got {:?}", other),
    }
    provider.set_permission_granted(true);

    // The session controller shields the screen from the same failures
    let service = MockPermissionService::new(tx);
    service.set_granted(LocationCapability::Fine, true);
    let gate = PermissionGate::new(Box::new(service));
    let mut session =
        LocationSessionController::new(Box::new(provider.clone()), LocationUpdateConfig::default());

    provider.set_available(false);
    session.start_updates(&gate);
    println!("Start during outage leaves session {:?}", session.state());

    provider.set_available(true);
    session.start_updates(&gate);
    println!("Start after recovery: {:?}", session.state());

    let batch = [
        LocationSample::new(LatLng::new(36.31965, 127.36601), 4_000),
        LocationSample::new(LatLng::new(36.31972, 127.36608), 7_000),
    ];
    provider.emit_batch(&batch);

    let mut delivered = 0;
    while let Ok(event) = rx.try_recv() {
        if let PlatformEvent::LocationUpdate { samples } = event {
            delivered += samples.len();
        }
    }
    println!("Samples delivered through the channel: {}", delivered);

    session.stop_updates();
    println!("After stop: {:?}", session.state());

    println!("Provider outage demo completed\n");
    Ok(())
}

fn demo_trace_replay() -> Result<(), Box<dyn std::error::Error>> {
    println!("--- Trace Replay Demo ---");

    let trace = r#"
    {
      "samples": [
        { "position": { "latitude": 36.31959, "longitude": 127.36597 }, "timestamp_ms": 0 },
        { "position": { "latitude": 36.31966, "longitude": 127.36604 }, "timestamp_ms": 3000 },
        { "position": { "latitude": 36.31974, "longitude": 127.36611 }, "timestamp_ms": 6000 },
        { "position": { "latitude": 36.31981, "longitude": 127.36619 }, "timestamp_ms": 9000 },
        { "position": { "latitude": 36.31988, "longitude": 127.36627 }, "timestamp_ms": 12000 }
      ]
    }
    "#;

    let (tx, rx) = event_channel();
    let mut provider = ReplayLocationProvider::from_json(trace, 2, tx)?;
    println!("Loaded recording with {} samples", provider.remaining());

    provider.subscribe(&LocationUpdateConfig::default())?;
    while provider.replay_next() {
        if let Ok(PlatformEvent::LocationUpdate { samples }) = rx.try_recv() {
            let last = &samples[samples.len() - 1];
            println!(
                "  batch of {} ending at t={}ms ({})",
                samples.len(),
                last.timestamp_ms,
                TextFormatter.format(last)
            );
        }
    }
    println!("Recording exhausted, {} samples left", provider.remaining());

    match provider.last_known_fix()? {
        Some(fix) => println!("Cached fix after replay: t={}ms", fix.timestamp_ms),
        None => println!("✗ Replay should have cached the final fix"),
    }

    println!("Trace replay demo completed\n");
    Ok(())
}

fn demo_formatters() -> Result<(), Box<dyn std::error::Error>> {
    println!("--- Formatter Demo ---");

    let walk = [
        LocationSample::new(LatLng::new(36.31959, 127.36597), 0),
        LocationSample::new(LatLng::new(36.31966, 127.36604), 3_000),
    ];

    println!("Text:  {}", TextFormatter.format(&walk[0]));
    println!("JSON:  {}", JsonFormatter::new().format(&walk[0]));
    println!("Pretty JSON:\n{}", JsonFormatter::pretty().format(&walk[0]));
    println!("CSV trace:\n{}", CsvFormatter::new().format_trace(&walk));

    println!("Formatter demo completed\n");
    Ok(())
}
