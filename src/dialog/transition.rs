//! Pure dialog transition function
//!
//! `transition` is the whole dialog state machine: given the current
//! conversation state and one event it returns the next state plus an
//! ordered list of effects, and nothing else. Given the same inputs it
//! always produces the same outputs, with no I/O.

use super::effect::{Card, Effect, Reply};
use super::event::Event;
use super::interpret::{self, Comparator, InterpretError, Operation, Variable};
use super::state::{ConvState, DialogState, HistoryFlow, QueryFlow, TurnContext};
use super::timeframe::{self, DateRange, TimeframeError};
use crate::nlu::{Entity, Intent};
use crate::weather::{Forecast, HistoryAggregate, HistoryEndpoint, HistoryRequest, Outcome};
use chrono::NaiveDate;
use thiserror::Error;

/// Result of one transition.
#[derive(Debug)]
pub struct Transition {
    pub new_state: ConvState,
    pub effects: Vec<Effect>,
}

impl Transition {
    pub fn new(state: ConvState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

#[derive(Debug, Error)]
pub enum TransitionError {
    /// The event cannot apply to the current state. Turns for one
    /// conversation are queued, so this only fires on collaborator answers
    /// arriving after the dialog moved on.
    #[error("no transition from {state} on {event}")]
    OutOfTurn {
        state: &'static str,
        event: &'static str,
    },
}

pub fn transition(
    state: &ConvState,
    ctx: &TurnContext,
    event: Event,
) -> Result<Transition, TransitionError> {
    match (&state.dialog, event) {
        // A fresh utterance always goes through NLU first.
        (DialogState::Idle, Event::UserMessage { text }) => {
            let mut next = state.clone();
            next.dialog = DialogState::Classifying;
            Ok(Transition::new(next)
                .with_effect(Effect::PersistState)
                .with_effect(Effect::Classify { text }))
        }

        // The only cross-turn suspension: the reply to "Where?" is consumed
        // raw as the location slot, then the parent flow resumes.
        (DialogState::AwaitingLocation { resume }, Event::UserMessage { text }) => {
            let resume = *resume;
            let mut next = state.clone();
            next.slots.location = Some(text.trim().to_string());
            Ok(begin_query(next, resume))
        }

        (DialogState::Classifying, Event::NluClassified { intent, entities }) => {
            Ok(classified(state, intent, &entities))
        }

        (DialogState::Classifying, Event::NluUnavailable { .. }) => {
            Ok(reply_and_idle(state, Reply::Unknown))
        }

        (DialogState::FetchingForecast { flow }, Event::ForecastFetched { outcome }) => {
            Ok(forecast_fetched(state, ctx, *flow, outcome))
        }

        (DialogState::FetchingHistory { flow }, Event::HistoryFetched { outcome }) => {
            Ok(history_fetched(state, flow.clone(), outcome))
        }

        (dialog, event) => Err(TransitionError::OutOfTurn {
            state: dialog.name(),
            event: event.name(),
        }),
    }
}

// ============================================================================
// Intent dispatch
// ============================================================================

fn classified(state: &ConvState, intent: Intent, entities: &[Entity]) -> Transition {
    match intent {
        Intent::Greeting => {
            let first_time = !state.greeted;
            let mut next = state.clone();
            next.greeted = true;
            next.dialog = DialogState::Idle;
            let mut result = Transition::new(next)
                .with_effect(Effect::PersistState)
                .with_effect(Effect::send(Reply::Greeting));
            // Usage examples go out once per conversation, ever.
            if first_time {
                result = result
                    .with_effect(Effect::send(Reply::Info))
                    .with_effect(Effect::send(Reply::Examples));
            }
            result
        }

        Intent::Help => {
            let mut next = state.clone();
            next.dialog = DialogState::Idle;
            Transition::new(next)
                .with_effect(Effect::PersistState)
                .with_effect(Effect::send(Reply::Info))
                .with_effect(Effect::send(Reply::Examples))
        }

        Intent::Thanks => reply_and_idle(state, Reply::Thanks),
        Intent::Goodbye => reply_and_idle(state, Reply::Goodbye),
        Intent::Unrecognized => reply_and_idle(state, Reply::Unknown),

        Intent::GetForecast => query_intent(state, entities, QueryFlow::GetForecast),
        Intent::CompareToPast => query_intent(state, entities, QueryFlow::CompareToPast),
        Intent::FindOptimal => query_intent(state, entities, QueryFlow::FindOptimal),
    }
}

/// Shared slot-filling discipline of the three query flows: merge whatever
/// entities arrived, then either suspend for a location or start querying.
fn query_intent(state: &ConvState, entities: &[Entity], flow: QueryFlow) -> Transition {
    let mut next = state.clone();
    next.slots.merge(entities);

    if next.slots.location.is_none() {
        next.dialog = DialogState::AwaitingLocation { resume: flow };
        Transition::new(next)
            .with_effect(Effect::PersistState)
            .with_effect(Effect::send(Reply::AskLocation))
    } else {
        begin_query(next, flow)
    }
}

/// Step two of every query flow: the location slot is filled, go fetch the
/// forecast for it.
fn begin_query(mut state: ConvState, flow: QueryFlow) -> Transition {
    let location = state.slots.location.clone().unwrap_or_default();
    state.dialog = DialogState::FetchingForecast { flow };
    Transition::new(state)
        .with_effect(Effect::PersistState)
        .with_effect(Effect::send(Reply::Thinking))
        .with_effect(Effect::FetchForecast { location })
}

// ============================================================================
// Forecast arrival
// ============================================================================

fn forecast_fetched(
    state: &ConvState,
    ctx: &TurnContext,
    flow: QueryFlow,
    outcome: Outcome<Forecast>,
) -> Transition {
    let forecast = match outcome {
        // Failure payloads go to the user verbatim in these flows.
        Outcome::Failure { raw } => return reply_and_idle(state, Reply::Raw { body: raw }),
        Outcome::Ok(forecast) => forecast,
    };

    match flow {
        QueryFlow::GetForecast => reply_and_idle(
            state,
            Reply::Forecast {
                text: forecast.local_text().to_string(),
            },
        ),
        QueryFlow::CompareToPast => begin_compare(state, ctx, &forecast),
        QueryFlow::FindOptimal => begin_optimal(state, ctx, &forecast),
    }
}

/// Interpreter/resolver failures while deriving query parameters.
#[derive(Debug, Error)]
enum DeriveError {
    #[error(transparent)]
    Interpret(#[from] InterpretError),
    #[error(transparent)]
    Timeframe(#[from] TimeframeError),
}

fn compare_params(
    condition: &str,
    timebounding: &str,
    today: NaiveDate,
) -> Result<(Variable, Operation, Comparator, DateRange), DeriveError> {
    let variable = interpret::variable(condition)?;
    let comparator = interpret::comparator(condition)?;
    let range = timeframe::resolve(timebounding, today)?;
    let operation = interpret::operation(condition)?;
    Ok((variable, operation, comparator, range))
}

fn begin_compare(state: &ConvState, ctx: &TurnContext, forecast: &Forecast) -> Transition {
    // Condition and timebounding are not validated up front; absent slots
    // surface here as the interpreters' typed failures.
    let condition = state.slots.condition.as_deref().unwrap_or_default();
    let timebounding = state.slots.timebounding.as_deref().unwrap_or_default();

    let (variable, operation, comparator, range) =
        match compare_params(condition, timebounding, ctx.today) {
            Ok(params) => params,
            Err(e) => {
                return reply_and_idle(
                    state,
                    Reply::DidNotUnderstand {
                        detail: e.to_string(),
                    },
                )
            }
        };

    let Some((latitude, longitude)) = forecast.coordinates() else {
        return reply_and_idle(state, Reply::Trouble);
    };
    let Some(reading) = forecast.current(variable) else {
        return reply_and_idle(state, Reply::Trouble);
    };

    let mut next = state.clone();
    next.dialog = DialogState::FetchingHistory {
        flow: HistoryFlow::Compare {
            variable,
            operation,
            comparator,
            site: forecast.site_name().to_string(),
            today_value: reading.value,
            units: reading.units.clone(),
        },
    };

    Transition::new(next)
        .with_effect(Effect::PersistState)
        .with_effect(Effect::send(Reply::Waiting))
        .with_effect(Effect::FetchHistory {
            request: HistoryRequest {
                endpoint: HistoryEndpoint::Climatology,
                variable,
                operation,
                latitude,
                longitude,
                range,
            },
        })
}

fn begin_optimal(state: &ConvState, ctx: &TurnContext, forecast: &Forecast) -> Transition {
    let condition = state.slots.condition.as_deref().unwrap_or_default();

    let derived = (|| -> Result<(Variable, Operation, DateRange), DeriveError> {
        let variable = interpret::variable(condition)?;
        // No timebounding means the full climatological baseline.
        let range = match state.slots.timebounding.as_deref() {
            Some(phrase) => timeframe::resolve(phrase, ctx.today)?,
            None => DateRange::unbounded(),
        };
        let operation = interpret::operation(condition)?;
        Ok((variable, operation, range))
    })();

    let (variable, operation, range) = match derived {
        Ok(params) => params,
        Err(e) => {
            return reply_and_idle(
                state,
                Reply::DidNotUnderstand {
                    detail: e.to_string(),
                },
            )
        }
    };

    let Some((latitude, longitude)) = forecast.coordinates() else {
        return reply_and_idle(state, Reply::Trouble);
    };

    // "is" asks about the present norm; anything else bounds a period.
    let endpoint = if state.slots.timemodifier.as_deref() == Some("is") {
        HistoryEndpoint::Climatology
    } else {
        HistoryEndpoint::Range
    };

    let mut next = state.clone();
    next.dialog = DialogState::FetchingHistory {
        flow: HistoryFlow::Optimal {
            variable,
            operation,
            site: forecast.site_name().to_string(),
        },
    };

    Transition::new(next)
        .with_effect(Effect::PersistState)
        .with_effect(Effect::send(Reply::Waiting))
        .with_effect(Effect::FetchHistory {
            request: HistoryRequest {
                endpoint,
                variable,
                operation,
                latitude,
                longitude,
                range,
            },
        })
}

// ============================================================================
// History arrival
// ============================================================================

fn history_fetched(
    state: &ConvState,
    flow: HistoryFlow,
    outcome: Outcome<HistoryAggregate>,
) -> Transition {
    match flow {
        HistoryFlow::Compare {
            variable,
            operation,
            comparator,
            site,
            today_value,
            units,
        } => {
            let hist = match outcome {
                // Same asymmetry as the forecast: no handler here, the raw
                // payload goes to the user.
                Outcome::Failure { raw } => {
                    return reply_and_idle(state, Reply::Raw { body: raw })
                }
                Outcome::Ok(hist) => hist,
            };

            let Some(average) = hist.numeric_value() else {
                return reply_and_idle(state, Reply::Raw { body: hist.value });
            };

            let affirmative = comparator.apply(today_value, average);
            let card = graph_card(operation, variable, &site, &hist);

            let mut next = state.clone();
            next.dialog = DialogState::Idle;
            Transition::new(next)
                .with_effect(Effect::PersistState)
                .with_effect(Effect::send(Reply::Comparison {
                    affirmative,
                    variable,
                    site,
                    today_value,
                    units,
                    start: hist.start_date,
                    end: hist.end_date,
                    average: hist.value,
                }))
                .with_effect(Effect::SendCard { card })
        }

        HistoryFlow::Optimal {
            variable,
            operation,
            site,
        } => {
            let hist = match outcome {
                // This flow attaches a handler: backend trouble becomes the
                // generic error phrase, never a raw payload.
                Outcome::Failure { .. } => return reply_and_idle(state, Reply::Trouble),
                Outcome::Ok(hist) => hist,
            };

            let card = graph_card(operation, variable, &site, &hist);

            let mut next = state.clone();
            next.dialog = DialogState::Idle;
            Transition::new(next)
                .with_effect(Effect::PersistState)
                .with_effect(Effect::send(Reply::Peak {
                    variable,
                    operation,
                    site,
                    value: hist.value,
                    start: hist.start_date,
                    end: hist.end_date,
                    peak_start: hist.peak_start,
                    peak_end: hist.peak_end,
                }))
                .with_effect(Effect::SendCard { card })
        }
    }
}

fn graph_card(
    operation: Operation,
    variable: Variable,
    site: &str,
    hist: &HistoryAggregate,
) -> Card {
    Card {
        title: format!(
            "{operation} {variable} for {site} {start} to {end}",
            start = hist.start_date,
            end = hist.end_date
        ),
        image_url: hist.chart_url.clone(),
        link_url: hist.chart_url.clone(),
    }
}

fn reply_and_idle(state: &ConvState, reply: Reply) -> Transition {
    let mut next = state.clone();
    next.dialog = DialogState::Idle;
    Transition::new(next)
        .with_effect(Effect::PersistState)
        .with_effect(Effect::send(reply))
}
