use campus_map::{
    campus_center, event_channel, AppConfig, CsvFormatter, EventSender, LandmarkPin, LatLng,
    LifecycleState, LocationSample, LocationSessionController, MapScreen, MockLocationProvider,
    MockMapHandle, MockPermissionService, PermissionGate, PlatformEvent,
};
use rand::Rng;
use std::thread;
use std::time::Duration;

/// Plays the OS side of the workflow from a second thread: grants the
/// permission dialog, hands over the map widget, resumes the screen,
/// walks a jittered path across campus, then tears the screen down.
/// Returns the walked trace for the export printed at the end.
fn spawn_platform_simulator(
    tx: EventSender,
    service: MockPermissionService,
    provider: MockLocationProvider,
    map: MockMapHandle,
    start: LatLng,
    interval_ms: u64,
) -> thread::JoinHandle<Vec<LocationSample>> {
    thread::spawn(move || {
        // the user taps "allow" on the dialog
        thread::sleep(Duration::from_millis(20));
        service.respond(true);

        // the widget finishes loading and hands over its controls
        tx.send(PlatformEvent::MapReady { map: Box::new(map) }).ok();

        // closing the dialog brings the screen back to the foreground
        tx.send(PlatformEvent::LifecycleChanged {
            state: LifecycleState::Visible,
        })
        .ok();

        // updates flow only once the screen has opened its subscription
        for _ in 0..200 {
            if provider.active_subscription_count() > 0 {
                break;
            }
            thread::sleep(Duration::from_millis(5));
        }

        let mut rng = rand::thread_rng();
        let mut walked = Vec::new();
        let mut position = start;
        for step in 1..=6u64 {
            position = LatLng::new(
                position.latitude + rng.gen_range(-1.5e-4..1.5e-4),
                position.longitude + rng.gen_range(-1.5e-4..1.5e-4),
            );
            let sample = LocationSample::new(position, step * interval_ms);
            walked.push(sample);
            provider.emit_batch(&[sample]);
            thread::sleep(Duration::from_millis(30));
        }

        tx.send(PlatformEvent::LifecycleChanged {
            state: LifecycleState::Hidden,
        })
        .ok();
        tx.send(PlatformEvent::Shutdown).ok();
        walked
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() > 2 {
        eprintln!(
            "Usage: {} [config_file.json]",
            args.get(0).map_or("campus-map", |s| s.as_str())
        );
        return Err("Invalid arguments".into());
    }

    let config = match args.get(1) {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };
    log::info!(
        "campus map demo starting (interval {}ms, zoom {})",
        config.update_interval_ms,
        config.camera_zoom
    );

    let (tx, rx) = event_channel();
    let service = MockPermissionService::new(tx.clone());
    let provider = MockLocationProvider::new(tx.clone());
    provider.set_last_known(Some(LocationSample::new(campus_center(), 0)));

    let gate = PermissionGate::new(Box::new(service.clone()));
    let session =
        LocationSessionController::new(Box::new(provider.clone()), config.location_config());
    let mut screen = MapScreen::new(gate, session)
        .with_camera_zoom(config.camera_zoom)
        .with_user_location_layer(config.user_location_layer)
        .with_fix_logging(config.log_each_fix);

    // issues the permission request; the simulator answers it
    screen.start();

    let map_observer = MockMapHandle::new();
    let simulator = spawn_platform_simulator(
        tx,
        service,
        provider,
        map_observer.clone(),
        campus_center(),
        config.update_interval_ms,
    );

    screen.run(rx);
    let walked = simulator.join().map_err(|_| "platform simulator panicked")?;

    println!("=== Session Summary ===");
    println!("Permission state:    {:?}", screen.permission_state());
    println!("Session state:       {:?}", screen.session_state());
    println!("Samples seen:        {}", screen.samples_seen());
    println!("Camera seeded:       {}", screen.camera_seeded());
    println!("User location layer: {}", map_observer.user_location_layer());
    if let Some((center, zoom)) = map_observer.camera() {
        println!(
            "Camera target:       {:.5}, {:.5} (zoom {})",
            center.latitude, center.longitude, zoom
        );
    }

    println!("\n=== Landmark Manifest ===");
    let pins: Vec<LandmarkPin> = map_observer
        .markers()
        .into_iter()
        .map(|(position, label)| LandmarkPin { label, position })
        .collect();
    println!("{}", serde_json::to_string_pretty(&pins)?);

    println!("\n=== Walked Trace ===");
    println!("{}", CsvFormatter::new().format_trace(&walked));

    Ok(())
}
