use autoteam_input::args::{Args, Mode};
use autoteam_input::config::Options;
use autoteam_input::game_automation::{
    Automation, AutomationError, AutomationResult, Formation, Lineup, MiiSelection,
};
use autoteam_input::keys::KeyBackend;
use log::{error, info, warn};
use std::process::ExitCode;

fn main() -> ExitCode {
    let Some(args) = Args::parse() else {
        return ExitCode::SUCCESS;
    };

    let default_filter = if args.debug_mode { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let options_path = args.options_path.clone().unwrap_or_else(Options::default_path);
    let options = match Options::load_or_create(&options_path) {
        Ok(options) => options,
        Err(e) => {
            error!("❌ {e}");
            return ExitCode::FAILURE;
        }
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            error!("❌ Failed to start runtime: {e}");
            return ExitCode::FAILURE;
        }
    };
    rt.block_on(run(args, options))
}

fn parse_formation(targets: &str, miis: Option<&str>) -> AutomationResult<Formation> {
    let mut formation: Formation = targets.parse()?;
    formation.miis = miis.map(str::parse::<MiiSelection>).transpose()?;
    Ok(formation)
}

async fn run(args: Args, options: Options) -> ExitCode {
    // Listing needs no key backend.
    if args.mode == Mode::ListRoutines {
        for name in options.routine_names() {
            println!("{name}");
        }
        return ExitCode::SUCCESS;
    }

    let backend = match KeyBackend::connect(args.dry_run) {
        Ok(backend) => backend,
        Err(e) => {
            error!("❌ {e}");
            return ExitCode::FAILURE;
        }
    };
    let mut automation = match Automation::from_options(backend, &options) {
        Ok(automation) => automation,
        Err(e) => {
            error!("❌ {e}");
            return ExitCode::FAILURE;
        }
    };

    let stop = automation.stop_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("🛑 Stop requested, releasing keys");
            stop.cancel();
        }
    });

    let result = match args.mode {
        Mode::StartGame => automation.start_game().await,
        Mode::Formation(targets) => match parse_formation(&targets, args.miis.as_deref()) {
            Ok(formation) => automation.apply_formation(&formation).await,
            Err(e) => Err(e),
        },
        Mode::SelectMiis => match args.miis.as_deref().unwrap_or_default().parse::<MiiSelection>() {
            Ok(selection) => automation.select_miis(&selection).await,
            Err(e) => Err(e),
        },
        Mode::Lineup(targets) => match targets.parse::<Lineup>() {
            Ok(lineup) => automation.apply_lineup(&lineup).await,
            Err(e) => Err(e),
        },
        Mode::Keys(text) => automation.run_instructions(&text).await,
        Mode::Routine(name) => automation.run_routine(&name).await,
        Mode::ListRoutines => Ok(()),
    };

    // Any failure reaching this point goes through the emergency release first.
    if result.is_err() {
        let released = automation.release_all().await;
        if released > 0 {
            warn!("Released {released} key(s) after failure");
        }
    }

    match result {
        Ok(()) => {
            if let KeyBackend::DryRun(driver) = automation.driver() {
                info!("🧪 Dry run recorded {} key events", driver.events().len());
            }
            ExitCode::SUCCESS
        }
        Err(AutomationError::Sequence(e)) if e.is_cancelled() => {
            warn!("⏹️ Stopped: {e}");
            ExitCode::from(130)
        }
        Err(e) => {
            error!("❌ {e}");
            ExitCode::FAILURE
        }
    }
}
