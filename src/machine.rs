//! Holders and the state machines that drive them.
//!
//! A [`Holder`] is the entity whose lifecycle is tracked. A
//! [`StateMachine`] is the per-domain context a transition calls back into
//! for its side effect. Transitions receive the concrete machine type, so a
//! domain's transitions can use every operation the machine exposes without
//! the generic layer knowing about them.

use crate::core::{Lifecycle, State, TransitionName};
use crate::transition::{self, Transition, TransitionError};
use uuid::Uuid;

/// State type of a machine's holder.
pub type StateOf<M> = <<M as StateMachine>::Holder as Holder>::State;

/// Transition-name type of a machine's holder.
pub type NameOf<M> = <<M as StateMachine>::Holder as Holder>::Name;

/// Grants mutable access to a holder's [`Lifecycle`].
///
/// Only this crate can create a key, so only the transition protocol can
/// reach [`Holder::lifecycle_mut`].
pub struct LifecycleKey {
    _private: (),
}

impl LifecycleKey {
    pub(crate) fn new() -> Self {
        Self { _private: () }
    }
}

/// An entity whose lifecycle state is tracked.
///
/// # Example
///
/// ```rust
/// use statekeeper::core::Lifecycle;
/// use statekeeper::graph::TransitionGraph;
/// use statekeeper::machine::{Holder, LifecycleKey};
/// use statekeeper::transition::TransitionRecord;
/// use statekeeper::{state_enum, transition_name_enum};
/// use uuid::Uuid;
///
/// state_enum! {
///     pub enum TicketState {
///         Open => "open",
///         Closed => "closed",
///     }
///     final: [Closed]
/// }
///
/// transition_name_enum! {
///     pub enum TicketAction {
///         Close => "close",
///     }
/// }
///
/// struct Ticket {
///     id: Uuid,
///     lifecycle: Lifecycle<TicketState, TicketAction>,
/// }
///
/// impl Holder for Ticket {
///     type State = TicketState;
///     type Name = TicketAction;
///     const KIND: &'static str = "ticket";
///
///     fn id(&self) -> Uuid {
///         self.id
///     }
///
///     fn lifecycle(&self) -> &Lifecycle<TicketState, TicketAction> {
///         &self.lifecycle
///     }
///
///     fn lifecycle_mut(&mut self, _key: LifecycleKey) -> &mut Lifecycle<TicketState, TicketAction> {
///         &mut self.lifecycle
///     }
/// }
///
/// let graph = TransitionGraph::new(vec![TransitionRecord::new(
///     TicketState::Open,
///     TicketAction::Close,
///     TicketState::Closed,
/// )]);
///
/// // A lifecycle can only start at an initial state of its graph.
/// assert!(Lifecycle::start(&graph, TicketState::Closed).is_err());
///
/// let lifecycle = Lifecycle::start(&graph, TicketState::Open).unwrap();
/// let ticket = Ticket { id: Uuid::new_v4(), lifecycle };
/// assert_eq!(ticket.state(), &TicketState::Open);
/// assert!(ticket.describe().starts_with("ticket "));
/// ```
pub trait Holder {
    type State: State;
    type Name: TransitionName;

    /// Short noun naming the kind of holder in messages.
    const KIND: &'static str;

    fn id(&self) -> Uuid;

    fn lifecycle(&self) -> &Lifecycle<Self::State, Self::Name>;

    /// Mutable access for the change-state phase of the protocol.
    fn lifecycle_mut(&mut self, key: LifecycleKey) -> &mut Lifecycle<Self::State, Self::Name>;

    fn state(&self) -> &Self::State {
        self.lifecycle().current()
    }

    /// Identity used in logs and precondition messages.
    fn describe(&self) -> String {
        format!("{} {}", Self::KIND, self.id())
    }
}

/// Per-domain context that transitions call back into.
pub trait StateMachine: Sized {
    type Holder: Holder;

    /// Apply `transition` to `holder`.
    ///
    /// Delegates to [`transition::perform`]; on error the holder is left as
    /// it was.
    fn execute<T>(&self, holder: &mut Self::Holder, transition: &T) -> Result<(), TransitionError>
    where
        T: Transition<Self> + ?Sized,
    {
        transition::perform(transition, holder, self)
    }

    /// Check whether `transition` would pass its preconditions for `holder`,
    /// without running it.
    fn can_execute<T>(&self, holder: &Self::Holder, transition: &T) -> bool
    where
        T: Transition<Self> + ?Sized,
    {
        transition::check_preconditions::<Self, T>(transition, holder).is_ok()
    }
}
