use heartfield::prelude::*;
use std::io::Write;
use std::time::Instant;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let scene = Scene::new(SceneConfig::default())?;

    let outline = scene.particles().iter().filter(|p| p.is_outline()).count();
    println!(
        "{} particles drifting ({} outline, {} fill). Press Enter to begin.",
        scene.particles().len(),
        outline,
        scene.particles().len() - outline
    );
    std::io::stdin().read_line(&mut String::new())?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(drive(scene))?;
    Ok(())
}

async fn drive(mut scene: Scene) -> Result<(), Box<dyn std::error::Error>> {
    scene.begin(Instant::now());

    while let Some(deadline) = scene.next_deadline() {
        tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await;
        for event in scene.update(Instant::now())? {
            match event {
                SceneEvent::GlowBurst => println!("\n    ♥\n"),
                SceneEvent::Settled => {
                    println!("{}", scene.title());
                    println!("{}", scene.subtitle());
                }
            }
        }
    }

    print!("{}", scene.timer_display());
    std::io::stdout().flush()?;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            reading = scene.timer_mut().next() => match reading {
                Some(reading) => {
                    print!("\r{}", reading);
                    std::io::stdout().flush()?;
                }
                None => break,
            },
        }
    }

    println!();
    scene.teardown();
    Ok(())
}
