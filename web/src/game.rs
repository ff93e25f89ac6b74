use crate::card::CardTile;
use crate::utils::*;
use clap::Args;
use gloo::timers::callback::Timeout;
use pizzaday_core as game;
use web_time::Instant;
use yew::prelude::*;

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Flip(game::CellIndex),
    ExpireIndicators,
    NewGame,
}

/// What the view has to do after a flip went through the engine.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
struct FlipEffects {
    redraw: bool,
    indicators_spawned: bool,
}

fn apply_flip(engine: &mut game::GameEngine, cell: game::CellIndex, now: game::Millis) -> FlipEffects {
    use game::GameEvent::*;

    let report = engine.flip(cell, now);
    let mut effects = FlipEffects {
        redraw: report.outcome.has_update(),
        ..Default::default()
    };

    for event in &report.events {
        match event {
            CardFlipped(cell) => log::debug!("flipped card {}", cell.id()),
            LineScored { line, rule, points, .. } => {
                log::debug!("+{} for {:?} ({:?})", points, line.cells(), rule);
                effects.indicators_spawned = true;
            }
            GameEnded { score } => log::debug!("game over, final score: {}", score),
        }
    }

    if !effects.redraw {
        log::trace!("flip of card {} ignored: {:?}", cell.id(), report.outcome);
    }
    effects
}

fn is_locked(engine: &game::GameEngine, card: &game::CardView) -> bool {
    engine.is_ended() || card.revealed || card.in_scored_line
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    #[prop_or_default]
    pub seed: Option<String>,
}

#[derive(Debug)]
pub(crate) struct GameView {
    engine: game::GameEngine,
    forced_seed: Option<u64>,
    expiry_timer: Option<Timeout>,
    clock_origin: Instant,
}

impl GameView {
    /// Monotonic milliseconds since the view was created, wall clock adjustments do not affect it.
    fn now(&self) -> game::Millis {
        millis_since(self.clock_origin)
    }

    fn next_seed(&self) -> u64 {
        self.forced_seed.unwrap_or_else(js_random_seed)
    }

    /// Arms a single timeout for the earliest indicator that has to disappear.
    fn schedule_expiry(&mut self, ctx: &Context<Self>) {
        let now = self.now();
        self.expiry_timer = self.engine.indicators().next_expiry().map(|expires_at| {
            let delay = expires_at.saturating_sub(now);
            let link = ctx.link().clone();
            Timeout::new(
                delay.try_into().unwrap_or(u32::MAX),
                move || link.send_message(Msg::ExpireIndicators),
            )
        });
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let forced_seed = ctx.props().seed.as_deref().map(seed_from_str);
        let seed = forced_seed.unwrap_or_else(js_random_seed);
        log::debug!("first game, seed: {}", seed);

        Self {
            engine: game::GameEngine::new(game::GameConfig::default(), seed),
            forced_seed,
            expiry_timer: None,
            clock_origin: Instant::now(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Flip(cell) => {
                let now = self.now();
                let effects = apply_flip(&mut self.engine, cell, now);
                if effects.indicators_spawned {
                    self.schedule_expiry(ctx);
                }
                effects.redraw
            }
            ExpireIndicators => {
                let now = self.now();
                let removed = self.engine.expire_indicators(now);
                self.schedule_expiry(ctx);
                removed > 0
            }
            NewGame => {
                let seed = self.next_seed();
                match self.engine.reset(seed) {
                    Ok(()) => {
                        self.expiry_timer = None;
                        true
                    }
                    Err(err) => {
                        log::warn!("new game refused: {}", err);
                        false
                    }
                }
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let engine = &self.engine;
        let cb_flip = ctx.link().callback(Msg::Flip);
        let cb_new_game = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            Msg::NewGame
        });

        html! {
            <div class="pizzaday">
                <aside class="score">
                    <p>{format!("Score: {}", engine.score())}</p>
                </aside>
                <main>
                    {
                        for engine.indicators().iter().map(|indicator| html! {
                            <p
                                key={indicator.id.to_string()}
                                class="indicator"
                                style={format!("left: {}px; top: {}px;", indicator.left, indicator.top)}
                            >
                                {format!("+{}", indicator.points)}
                            </p>
                        })
                    }
                    <h1>{"🍕Bitcoin Pizza Day!!"}</h1>
                    <div class="grid">
                        {
                            for engine.cards().map(|card| {
                                let locked = is_locked(engine, &card);
                                let callback = cb_flip.clone();
                                html! {
                                    <CardTile key={card.cell.id().to_string()} {card} {locked} {callback}/>
                                }
                            })
                        }
                    </div>
                </main>
                if engine.is_ended() {
                    <div class="overlay">
                        <button onclick={cb_new_game}>{"Play Again"}</button>
                    </div>
                }
            </div>
        }
    }
}
