//! Generic finite-state machine driving every turn-taking actor.
//! States receive the entity they steer plus the world it lives in, and
//! request transitions by returning them; nothing re-enters the machine
//! mid-update, and the tick after a change is always skipped.

pub enum Transition<E, W> {
    Stay,
    To(Box<dyn State<E, W>>),
}

pub trait State<E, W> {
    fn name(&self) -> &'static str;

    /// Entering may immediately request a follow-on transition, which lets
    /// pass-through states bounce without consuming a tick.
    fn enter(&mut self, _entity: &mut E, _world: &mut W) -> Transition<E, W> {
        Transition::Stay
    }

    fn update(&mut self, entity: &mut E, world: &mut W) -> Transition<E, W>;

    fn exit(&mut self, _entity: &mut E, _world: &mut W) {}
}

pub struct StateMachine<E, W> {
    current: Box<dyn State<E, W>>,
    previous: Option<Box<dyn State<E, W>>>,
    global: Option<Box<dyn State<E, W>>>,
    just_changed: bool,
}

impl<E, W> StateMachine<E, W> {
    pub fn new(initial: Box<dyn State<E, W>>, entity: &mut E, world: &mut W) -> Self {
        let mut machine =
            Self { current: initial, previous: None, global: None, just_changed: false };
        let follow = machine.current.enter(entity, world);
        machine.apply(follow, entity, world);
        machine
    }

    /// Runs the current state (and the global state, when set) for one tick.
    /// Exactly one tick is skipped after every transition so a freshly
    /// entered state is never updated in the tick that created it.
    pub fn update(&mut self, entity: &mut E, world: &mut W) {
        if self.just_changed {
            self.just_changed = false;
            return;
        }
        let transition = self.current.update(entity, world);
        self.apply(transition, entity, world);
        if let Some(mut global) = self.global.take() {
            let transition = global.update(entity, world);
            self.global = Some(global);
            self.apply(transition, entity, world);
        }
    }

    pub fn change_state(&mut self, next: Box<dyn State<E, W>>, entity: &mut E, world: &mut W) {
        self.current.exit(entity, world);
        let old = std::mem::replace(&mut self.current, next);
        self.previous = Some(old);
        self.just_changed = true;
        let follow = self.current.enter(entity, world);
        self.apply(follow, entity, world);
    }

    pub fn set_global(&mut self, global: Box<dyn State<E, W>>) {
        self.global = Some(global);
    }

    pub fn current_name(&self) -> &'static str {
        self.current.name()
    }

    pub fn previous_name(&self) -> Option<&'static str> {
        self.previous.as_ref().map(|state| state.name())
    }

    fn apply(&mut self, transition: Transition<E, W>, entity: &mut E, world: &mut W) {
        if let Transition::To(next) = transition {
            self.change_state(next, entity, world);
        }
    }
}
