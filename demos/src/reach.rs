//! Point-reaching demo.
//!
//! A point starts at a random offset from the origin and moves by
//! `dt · action` each step. The controller observes the offset and is
//! rewarded for shrinking it, so a learned policy should drive the point
//! toward zero.
//!
//! ```text
//! cargo run --bin reach -- [config.json] [episodes]
//! RUST_LOG=debug cargo run --bin reach
//! ```

use burn::backend::{Autodiff, NdArray};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use ddpg_rl::{adam_actor, adam_critic, DdpgConfig, EpisodeKind, PolicyController, PolicyServer};

type Backend = Autodiff<NdArray<f32>>;

const DIM: usize = 3;
const STEPS_PER_EPISODE: usize = 25;
const DT: f32 = 0.1;
const DEFAULT_EPISODES: usize = 300;

fn main() -> ddpg_rl::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => DdpgConfig::from_json_file(path)?,
        None => DdpgConfig::reference(DIM, DIM)
            .with_batch_size(256)
            .with_buffer_capacity(5_000)
            .with_tau(0.01),
    };
    let episodes = args
        .next()
        .and_then(|n| n.parse().ok())
        .unwrap_or(DEFAULT_EPISODES);

    let device = Default::default();
    let actor = adam_actor::<Backend>(&config, &device);
    let critic = adam_critic::<Backend>(&config, &device);
    let mut rng = StdRng::seed_from_u64(config.seed);
    let state_dim = config.state_dim;

    let server = PolicyServer::spawn(PolicyController::new(config, actor, critic)?)?;
    let handle = server.handle();

    for _ in 0..episodes {
        let mut offset: Vec<f32> = (0..state_dim).map(|_| rng.gen_range(-1.0..1.0)).collect();

        for _ in 0..STEPS_PER_EPISODE {
            let action = handle.query_action(&offset)?;
            for (x, a) in offset.iter_mut().zip(&action) {
                *x = (*x + DT * a).clamp(-2.0, 2.0);
            }
        }
        // Record the final position so the last move is rewarded.
        handle.query_action(&offset)?;

        let outcome = handle.notify_episode_end()?;
        match outcome.kind {
            EpisodeKind::Evaluated { ret } => {
                log::info!("episode {:>4}  eval return {:>10.2}", outcome.episode, ret)
            }
            EpisodeKind::Trained { critic_loss, max_q } if outcome.episode % 25 == 0 => {
                log::info!(
                    "episode {:>4}  critic loss {:>10.4}  max Q {:>8.3}",
                    outcome.episode,
                    critic_loss,
                    max_q
                )
            }
            _ => {}
        }
    }

    let stats = server.stats();
    {
        let stats = stats.read();
        log::info!(
            "{} episodes, {} training steps, mean eval return {:?}",
            stats.episodes,
            stats.train_steps,
            stats.mean_eval_return()
        );
    }

    server.shutdown()?;
    Ok(())
}
