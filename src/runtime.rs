//! Top-level coordinator
//!
//! Owns the model, the engine, the settings store and the host message
//! subscription, feeds messages through `update` and executes the resulting
//! commands. Everything runs synchronously: a message is fully processed,
//! including the dispatch it triggers, before the next one is handled.

use crate::commands::Cmd;
use crate::config::PlaygroundConfig;
use crate::dispatch::{DispatchOptions, Dispatcher};
use crate::engine::TemplateEngine;
use crate::messages::{Msg, OutputMsg};
use crate::model::{OutputState, PaneLayout, PlaygroundModel};
use crate::settings::{
    get_or, SettingsStore, CONTEXT_WIDTH_KEY, DEFAULT_CONTEXT_WIDTH, DEFAULT_OUTPUT_HEIGHT,
    OUTPUT_HEIGHT_KEY,
};
use crate::subscription::{HostPort, SubscribeError, Subscription};
use crate::update::update;

pub struct Playground<E: TemplateEngine, S: SettingsStore> {
    model: PlaygroundModel,
    engine: E,
    settings: S,
    options: DispatchOptions,
    subscription: Option<Subscription>,
    redraws: u64,
}

impl<E: TemplateEngine, S: SettingsStore> Playground<E, S> {
    /// Playground over the sample template and context
    pub fn new(
        engine: E,
        settings: S,
        config: &PlaygroundConfig,
        host: &mut HostPort,
    ) -> Result<Self, SubscribeError> {
        Self::with_model(engine, settings, config, PlaygroundModel::new(config), host)
    }

    /// Subscribe to host messages once, restore pane sizes and compute the
    /// first output
    pub fn with_model(
        engine: E,
        settings: S,
        config: &PlaygroundConfig,
        mut model: PlaygroundModel,
        host: &mut HostPort,
    ) -> Result<Self, SubscribeError> {
        let subscription = host.subscribe()?;

        model.layout = PaneLayout {
            output_height: get_or(&settings, OUTPUT_HEIGHT_KEY, DEFAULT_OUTPUT_HEIGHT),
            context_width: get_or(&settings, CONTEXT_WIDTH_KEY, DEFAULT_CONTEXT_WIDTH),
        };

        let mut playground = Self {
            model,
            engine,
            settings,
            options: DispatchOptions::from_config(config),
            subscription: Some(subscription),
            redraws: 0,
        };
        tracing::info!(
            "Playground started in {} mode ({}x{} panes)",
            playground.model.mode,
            playground.model.layout.context_width,
            playground.model.layout.output_height
        );
        playground.handle(Msg::Output(OutputMsg::Refresh));
        Ok(playground)
    }

    /// Process one message to completion
    pub fn handle(&mut self, msg: Msg) {
        if let Some(cmd) = update(&mut self.model, msg) {
            self.run(cmd);
        }
    }

    fn run(&mut self, cmd: Cmd) {
        match cmd {
            Cmd::None => {}
            Cmd::Redraw => self.redraws += 1,
            Cmd::Resolve { revision, request } => {
                let result = Dispatcher::new(&self.engine, &self.options).resolve(
                    request.mode,
                    &request.template,
                    &request.context,
                    request.py_compat,
                );
                self.handle(Msg::Output(OutputMsg::Completed {
                    revision,
                    mode: request.mode,
                    result,
                }));
            }
            Cmd::SaveSetting { key, value } => {
                if let Err(e) = self.settings.set(key, value) {
                    tracing::debug!("Ignoring failed settings write for {}: {}", key, e);
                }
            }
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.run(cmd);
                }
            }
        }
    }

    /// Handle every host message posted since the last poll
    pub fn poll_host(&mut self) -> usize {
        let events = match &self.subscription {
            Some(subscription) => subscription.drain(),
            None => return 0,
        };
        let count = events.len();
        for event in events {
            self.handle(Msg::Host(event));
        }
        count
    }

    /// Drop the host subscription; later posts are refused
    pub fn shutdown(&mut self) {
        if self.subscription.take().is_some() {
            tracing::info!("Host subscription closed");
        }
    }

    pub fn is_listening(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn model(&self) -> &PlaygroundModel {
        &self.model
    }

    /// Output for the current revision
    pub fn output(&self) -> Option<&OutputState> {
        self.model.current_output()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn settings(&self) -> &S {
        &self.settings
    }

    /// Number of redraws requested so far
    pub fn redraw_count(&self) -> u64 {
        self.redraws
    }
}
