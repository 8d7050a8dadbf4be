use std::{
    any::TypeId,
    collections::{BTreeMap, VecDeque},
};

use flume::{Receiver, Sender};
use log::{debug, error, warn};
use tokio_util::sync::CancellationToken;

use crate::{
    Command, CommandFuture, CommandSnapshot, Compute, Dep, Error, Graph, LatestOnlyUpdater, State,
    StateSyncStatus, TaskHandle, TaskId, Updater, updater::Update,
};

/// Owner of every registered state, compute and command.
///
/// Frame loop:
/// 1. `sync_computes()` applies values sent through `Updater`s and marks dependents dirty.
/// 2. UI reads `state()` / `cached()` and calls `update()` / `enqueue_command()`.
/// 3. `run_computed()` recomputes dirty computes; `flush_commands()` spawns queued commands.
pub struct StateCtx {
    states: BTreeMap<TypeId, Box<dyn State>>,
    computes: BTreeMap<TypeId, Box<dyn Compute>>,
    status: BTreeMap<TypeId, StateSyncStatus>,
    graph: Graph<TypeId>,

    commands: BTreeMap<TypeId, Box<dyn Command>>,
    command_queue: VecDeque<TypeId>,
    running: BTreeMap<TypeId, TaskHandle>,
    generation: u64,

    send: Sender<Update>,
    recv: Receiver<Update>,

    #[cfg(not(target_arch = "wasm32"))]
    tasks: tokio::task::JoinSet<()>,
}

impl Default for StateCtx {
    fn default() -> Self {
        Self::new()
    }
}

impl StateCtx {
    pub fn new() -> Self {
        let (send, recv) = flume::unbounded();
        Self {
            states: BTreeMap::new(),
            computes: BTreeMap::new(),
            status: BTreeMap::new(),
            graph: Graph::new(),
            commands: BTreeMap::new(),
            command_queue: VecDeque::new(),
            running: BTreeMap::new(),
            generation: 0,
            send,
            recv,
            #[cfg(not(target_arch = "wasm32"))]
            tasks: tokio::task::JoinSet::new(),
        }
    }

    pub fn add_state<T: State>(&mut self, state: T) {
        self.states.insert(TypeId::of::<T>(), Box::new(state));
    }

    pub fn record_compute<T: Compute>(&mut self, compute: T) {
        let id = TypeId::of::<T>();
        for dep in compute.deps().iter() {
            self.graph.route_to(dep, id, ());
        }
        self.status.insert(id, StateSyncStatus::BeforeInit);
        self.computes.insert(id, Box::new(compute));
    }

    pub fn record_command<T: Command>(&mut self, command: T) {
        self.commands.insert(TypeId::of::<T>(), Box::new(command));
    }

    /// Validate the compute dependency graph, returning computes in evaluation order.
    pub fn verify_deps(&self) -> Result<Vec<TypeId>, Error> {
        Ok(self.graph.topology_sort()?)
    }

    pub fn try_state<T: State>(&self) -> Result<&T, Error> {
        self.states
            .get(&TypeId::of::<T>())
            .and_then(|state| state.as_any().downcast_ref::<T>())
            .ok_or_else(Error::state_not_found::<T>)
    }

    /// # Panics
    /// Panics if `T` was never registered with `add_state`.
    pub fn state<T: State>(&self) -> &T {
        self.try_state::<T>()
            .unwrap_or_else(|err| panic!("{err}"))
    }

    /// Mutable access that does **not** mark dependents dirty.
    ///
    /// Meant for UI-local scratch state (text inputs); use `update` for anything
    /// a compute reads.
    ///
    /// # Panics
    /// Panics if `T` was never registered with `add_state`.
    pub fn state_mut<T: State>(&mut self) -> &mut T {
        self.states
            .get_mut(&TypeId::of::<T>())
            .and_then(|state| state.as_any_mut().downcast_mut::<T>())
            .unwrap_or_else(|| panic!("{}", Error::state_not_found::<T>()))
    }

    /// Mutate a state in place and mark every compute depending on it dirty.
    pub fn update<T: State>(&mut self, f: impl FnOnce(&mut T)) {
        let id = TypeId::of::<T>();
        match self
            .states
            .get_mut(&id)
            .and_then(|state| state.as_any_mut().downcast_mut::<T>())
        {
            Some(state) => f(state),
            None => {
                error!("{}", Error::state_not_found::<T>());
                return;
            }
        }
        self.mark_dependents_dirty(id);
    }

    pub fn cached<T: Compute>(&self) -> Option<&T> {
        self.computes
            .get(&TypeId::of::<T>())
            .and_then(|compute| compute.as_any().downcast_ref::<T>())
    }

    pub fn sync_status<T: Compute>(&self) -> Option<StateSyncStatus> {
        self.status.get(&TypeId::of::<T>()).copied()
    }

    pub fn updater(&self) -> Updater {
        Updater::new(self.send.clone())
    }

    /// Whether updaters have sent values `sync_computes` has not applied yet.
    pub fn has_pending_updates(&self) -> bool {
        !self.recv.is_empty()
    }

    /// Apply pending updates from updaters.
    ///
    /// Updates tagged by a task that is no longer the latest of its command type
    /// are dropped.
    pub fn sync_computes(&mut self) {
        self.reap_tasks();

        let pending: Vec<Update> = self.recv.try_iter().collect();
        for update in pending {
            if let Some(task) = update.task
                && !self.is_latest(task)
            {
                debug!(
                    "Dropping update from superseded task generation {}",
                    task.generation()
                );
                continue;
            }
            self.apply_update(update);
        }
    }

    fn apply_update(&mut self, update: Update) {
        let Update { id, value, .. } = update;
        if let Some(compute) = self.computes.get_mut(&id) {
            compute.assign_box(value);
        } else if let Some(state) = self.states.get_mut(&id) {
            state.assign_box(value);
        } else {
            warn!("Update for unregistered type {id:?} ignored");
            return;
        }
        self.mark_dependents_dirty(id);
    }

    fn mark_dependents_dirty(&mut self, id: TypeId) {
        let dependents: Vec<TypeId> = self.graph.dependents(id).copied().collect();
        for dependent in dependents {
            if self.computes.contains_key(&dependent) {
                self.status.insert(dependent, StateSyncStatus::Dirty);
            }
        }
    }

    /// Recompute every compute that is dirty or has never run, in dependency order.
    pub fn run_computed(&mut self) {
        let order = match self.verify_deps() {
            Ok(order) => order,
            Err(err) => {
                error!("Skipping computes: {err}");
                return;
            }
        };

        let mut pending: Vec<TypeId> = self
            .status
            .iter()
            .filter(|(_, status)| status.needs_compute())
            .map(|(id, _)| *id)
            .collect();
        // computes outside the graph have no deps and sort first
        pending.sort_by_key(|id| order.iter().position(|o| o == id));

        let updater = self.updater();
        for id in pending {
            if let Some(compute) = self.computes.get(&id) {
                let dep = Dep::new(&self.states);
                compute.compute(dep, updater.clone());
            }
            self.status.insert(id, StateSyncStatus::Clean);
        }
    }

    /// Queue `T` for the next `flush_commands`. Unrecorded commands are logged and dropped.
    pub fn enqueue_command<T: Command>(&mut self) {
        let id = TypeId::of::<T>();
        if !self.commands.contains_key(&id) {
            error!("{}", Error::command_not_found::<T>());
            return;
        }
        self.command_queue.push_back(id);
    }

    /// Spawn every queued command.
    ///
    /// Natively this spawns onto the ambient tokio runtime, so it must be called
    /// from within one.
    pub fn flush_commands(&mut self) {
        while let Some(id) = self.command_queue.pop_front() {
            let Some(command) = self.commands.get(&id) else {
                error!("Command {id:?} queued but never recorded");
                continue;
            };

            self.generation += 1;
            let task = TaskId::new(id, self.generation);
            let token = CancellationToken::new();
            if let Some(previous) = self
                .running
                .insert(id, TaskHandle::new(task, token.clone()))
            {
                debug!(
                    "Cancelling task generation {} superseded by {}",
                    previous.id().generation(),
                    task.generation()
                );
                previous.cancel();
            }

            let snapshot = self.snapshot();
            let updater = LatestOnlyUpdater::new(self.updater(), task);
            let future = command.run(snapshot, updater, token);
            self.spawn(future);
        }
    }

    fn is_latest(&self, task: TaskId) -> bool {
        self.running
            .get(&task.type_id())
            .is_some_and(|handle| handle.id() == task)
    }

    fn snapshot(&self) -> CommandSnapshot {
        let mut snapshot = CommandSnapshot::new();
        for (id, state) in &self.states {
            if let Some(cloned) = state.clone_boxed() {
                snapshot.insert_cloned(*id, cloned);
            }
        }
        for (id, compute) in &self.computes {
            if let Some(cloned) = compute.clone_boxed() {
                snapshot.insert_cloned(*id, cloned);
            }
        }
        snapshot
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn spawn(&mut self, future: CommandFuture) {
        self.tasks.spawn(future);
    }

    #[cfg(target_arch = "wasm32")]
    fn spawn(&mut self, future: CommandFuture) {
        wasm_bindgen_futures::spawn_local(future);
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn reap_tasks(&mut self) {
        while let Some(result) = self.tasks.try_join_next() {
            if let Err(err) = result {
                error!("Command task failed: {err}");
            }
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn reap_tasks(&mut self) {}

    /// Number of spawned command tasks not yet reaped.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Wait for the next spawned task to finish. Returns `false` when none are left.
    #[cfg(not(target_arch = "wasm32"))]
    pub async fn join_next_task(&mut self) -> bool {
        match self.tasks.join_next().await {
            Some(Err(err)) => {
                error!("Command task failed: {err}");
                true
            }
            Some(Ok(())) => true,
            None => false,
        }
    }
}

impl std::fmt::Debug for StateCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateCtx")
            .field("states", &self.states.len())
            .field("computes", &self.computes.len())
            .field("commands", &self.commands.len())
            .field("queued", &self.command_queue.len())
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}
