//! Process-wide key listener with lifetime-scoped subscriptions.
//!
//! Components register their shortcuts when they mount and get back a
//! [`KeySubscription`]. Dropping the subscription unregisters every binding it
//! added, so a component that has been torn down can never receive keys.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crossterm::event::KeyEvent;

use crate::ui::keybindings::{Command, Shortcut};

#[derive(Default)]
struct Registry {
    next_id: u64,
    entries: Vec<Entry>,
}

struct Entry {
    id: u64,
    owner: &'static str,
    shortcuts: Vec<&'static Shortcut>,
}

/// Routes key events to the shortcuts of currently mounted components.
///
/// Cloning yields another handle onto the same listener set.
#[derive(Clone, Default)]
pub struct KeyRouter {
    registry: Rc<RefCell<Registry>>,
}

impl KeyRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `shortcuts` on behalf of `owner` until the returned guard drops
    pub fn subscribe<I>(&self, owner: &'static str, shortcuts: I) -> KeySubscription
    where
        I: IntoIterator<Item = &'static Shortcut>,
    {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;

        let shortcuts: Vec<_> = shortcuts.into_iter().collect();
        tracing::debug!(owner, id, bindings = shortcuts.len(), "key listener attached");
        registry.entries.push(Entry {
            id,
            owner,
            shortcuts,
        });

        KeySubscription {
            id,
            owner,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Resolve a key event to the command of the first matching binding
    pub fn dispatch(&self, event: &KeyEvent) -> Option<Command> {
        let registry = self.registry.borrow();
        registry
            .entries
            .iter()
            .flat_map(|entry| entry.shortcuts.iter())
            .find(|shortcut| shortcut.matches(event))
            .map(|shortcut| shortcut.command)
    }

    /// Number of live subscriptions
    pub fn listener_count(&self) -> usize {
        self.registry.borrow().entries.len()
    }

    /// Whether `owner` currently holds a subscription
    pub fn is_listening(&self, owner: &str) -> bool {
        self.registry
            .borrow()
            .entries
            .iter()
            .any(|entry| entry.owner == owner)
    }
}

/// Guard for a set of bindings; unregisters them on drop.
#[must_use = "bindings are removed as soon as the subscription is dropped"]
pub struct KeySubscription {
    id: u64,
    owner: &'static str,
    registry: Weak<RefCell<Registry>>,
}

impl KeySubscription {
    pub fn owner(&self) -> &'static str {
        self.owner
    }
}

impl std::fmt::Debug for KeySubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeySubscription")
            .field("id", &self.id)
            .field("owner", &self.owner)
            .finish()
    }
}

impl Drop for KeySubscription {
    fn drop(&mut self) {
        // Router already gone: nothing left to unregister from
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        registry.borrow_mut().entries.retain(|entry| entry.id != self.id);
        tracing::debug!(owner = self.owner, id = self.id, "key listener detached");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::keybindings::{shortcuts_for_context, ShortcutContext};
    use crate::ui::stepper::StepperAction;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn ctrl_right() -> KeyEvent {
        KeyEvent::new(KeyCode::Right, KeyModifiers::CONTROL)
    }

    #[test]
    fn test_dispatch_without_listeners_is_none() {
        let router = KeyRouter::new();
        assert_eq!(router.dispatch(&ctrl_right()), None);
    }

    #[test]
    fn test_subscription_routes_until_dropped() {
        let router = KeyRouter::new();
        let subscription =
            router.subscribe("stepper", shortcuts_for_context(ShortcutContext::Stepper));

        assert_eq!(
            router.dispatch(&ctrl_right()),
            Some(Command::Stepper(StepperAction::Advance))
        );
        assert!(router.is_listening("stepper"));

        drop(subscription);

        assert_eq!(router.dispatch(&ctrl_right()), None);
        assert_eq!(router.listener_count(), 0);
    }

    #[test]
    fn test_dropping_one_subscription_keeps_others() {
        let router = KeyRouter::new();
        let general = router.subscribe("app", shortcuts_for_context(ShortcutContext::General));
        let stepper = router.subscribe("stepper", shortcuts_for_context(ShortcutContext::Stepper));
        assert_eq!(router.listener_count(), 2);

        drop(stepper);

        assert_eq!(router.listener_count(), 1);
        assert_eq!(general.owner(), "app");
        assert_eq!(
            router.dispatch(&KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE)),
            Some(Command::FocusNext)
        );
    }

    #[test]
    fn test_subscription_outliving_router_drops_cleanly() {
        let router = KeyRouter::new();
        let subscription =
            router.subscribe("timer", shortcuts_for_context(ShortcutContext::Timer));
        drop(router);
        drop(subscription);
    }

    #[test]
    fn test_cloned_router_shares_listeners() {
        let router = KeyRouter::new();
        let handle = router.clone();
        let _subscription =
            handle.subscribe("stepper", shortcuts_for_context(ShortcutContext::Stepper));
        assert_eq!(router.listener_count(), 1);
    }
}
