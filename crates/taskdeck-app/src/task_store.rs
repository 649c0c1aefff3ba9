//! Authoritative task and category state.
//!
//! Every mutator applies its change, rebuilds the derived view, hands the
//! touched collections to persistence and only then notifies observers, all
//! before returning. Persistence failures are logged and otherwise ignored.

use std::path::Path;

use anyhow::{Context, Error, Result};
use taskdeck_core::{
    Category, CategoryId, FilterOptions, FilterPatch, NewCategory, NewTask, SortOption, Task, TaskId,
    TaskStats,
};
use taskdeck_store::FileStore;
use time::Date;
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::AppConfig;
use crate::derived_view::DerivedView;
use crate::notice::{Notice, Observer, Observers, StoreEvent, SubscriptionId};
use crate::persistence::{
    CodecError, CollectionKey, Persistence, decode_categories, decode_tasks, encode_categories, encode_tasks,
};
use crate::task_patch::TaskPatch;

/// State container owning tasks, categories, the live filter/sort selection
/// and the derived view computed from them.
pub struct TaskStore<P, C = SystemClock> {
    persistence: P,
    clock: C,
    tasks: Vec<Task>,
    categories: Vec<Category>,
    filters: FilterOptions,
    sort: SortOption,
    view: DerivedView,
    observers: Observers,
}

impl TaskStore<FileStore, SystemClock> {
    /// Open the file-backed store configured for `workdir`.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid or the data directory
    /// cannot be created.
    pub fn open_workdir(workdir: impl AsRef<Path>) -> Result<Self> {
        let workdir = workdir.as_ref();
        let config = AppConfig::from_workdir(workdir)?;
        let data_dir = config.data_dir(workdir);
        let store = FileStore::open(&data_dir)
            .with_context(|| format!("failed to open data directory {}", data_dir.display()))?;
        Ok(Self::open(store, SystemClock, &config))
    }
}

impl<P: Persistence, C: Clock> TaskStore<P, C> {
    /// Load both collections from `persistence`.
    ///
    /// Absent or unreadable collections fall back to no tasks and the
    /// configured default categories.
    #[must_use]
    pub fn open(persistence: P, clock: C, config: &AppConfig) -> Self {
        let tasks = load_collection(&persistence, CollectionKey::Tasks, decode_tasks).unwrap_or_default();
        let categories = load_collection(&persistence, CollectionKey::Categories, decode_categories)
            .unwrap_or_else(|| config.default_categories());
        info!(
            tasks = tasks.len(),
            categories = categories.len(),
            "Opened task store"
        );
        Self::from_parts(persistence, clock, tasks, categories, config.view.default_sort)
    }

    /// Build a store from already materialized collections without loading.
    #[must_use]
    pub fn from_parts(
        persistence: P,
        clock: C,
        tasks: Vec<Task>,
        categories: Vec<Category>,
        sort: SortOption,
    ) -> Self {
        let filters = FilterOptions::default();
        let view = DerivedView::build(&tasks, &filters, sort, clock.today());
        Self {
            persistence,
            clock,
            tasks,
            categories,
            filters,
            sort,
            view,
            observers: Observers::default(),
        }
    }

    /// Every task in insertion order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Tasks passing the live filters, in the live sort order.
    #[must_use]
    pub fn view(&self) -> &[Task] {
        self.view.tasks()
    }

    /// The derived view as a value.
    #[must_use]
    pub const fn derived_view(&self) -> &DerivedView {
        &self.view
    }

    /// Every category in insertion order.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Live filter configuration.
    #[must_use]
    pub const fn filter_options(&self) -> &FilterOptions {
        &self.filters
    }

    /// Live sort option.
    #[must_use]
    pub const fn sort_option(&self) -> SortOption {
        self.sort
    }

    /// Look up a task by id.
    #[must_use]
    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    /// Look up a category by id.
    #[must_use]
    pub fn category(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == *id)
    }

    /// Completion counters over all tasks.
    #[must_use]
    pub fn stats(&self) -> TaskStats {
        TaskStats::from_tasks(&self.tasks)
    }

    /// Labels describing the active filter constraints.
    #[must_use]
    pub fn active_filter_labels(&self) -> Vec<String> {
        self.filters.active_labels(&self.categories)
    }

    /// Calendar day used for due-date filtering.
    #[must_use]
    pub fn today(&self) -> Date {
        self.clock.today()
    }

    /// Backend the store writes to.
    #[must_use]
    pub const fn persistence(&self) -> &P {
        &self.persistence
    }

    /// Register an observer for notices and view changes.
    pub fn subscribe(&mut self, observer: Observer) -> SubscriptionId {
        self.observers.subscribe(observer)
    }

    /// Remove an observer. Returns false for unknown ids.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Append a new task with a fresh id and the current time as creation time.
    ///
    /// The fields are not validated.
    pub fn add_task(&mut self, fields: NewTask) -> TaskId {
        let task = Task::new(TaskId::generate(), self.clock.now(), fields);
        let id = task.id().clone();
        let notice = Notice::task_added(&task.title);
        self.tasks.push(task);
        debug!(task = %id, "Added task");

        self.rebuild_view();
        self.save_tasks();
        self.publish_view();
        self.notify(notice);
        id
    }

    /// Merge `patch` onto the task with `id`. Returns false (and does nothing)
    /// when no such task exists.
    pub fn update_task(&mut self, id: &TaskId, patch: TaskPatch) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|task| task.id() == id) else {
            debug!(task = %id, "Update skipped: unknown task");
            return false;
        };
        patch.apply_to(task);
        debug!(task = %id, "Updated task");

        self.rebuild_view();
        self.save_tasks();
        self.publish_view();
        self.notify(Notice::task_updated());
        true
    }

    /// Remove the task with `id`.
    ///
    /// A notice is emitted either way; it names the task when one was removed.
    pub fn delete_task(&mut self, id: &TaskId) -> Option<Task> {
        let removed = self
            .tasks
            .iter()
            .position(|task| task.id() == id)
            .map(|index| self.tasks.remove(index));
        let notice = Notice::task_deleted(removed.as_ref().map(|task| task.title.as_str()));

        if removed.is_some() {
            debug!(task = %id, "Deleted task");
            self.rebuild_view();
            self.save_tasks();
            self.publish_view();
        } else {
            debug!(task = %id, "Delete skipped: unknown task");
        }
        self.notify(notice);
        removed
    }

    /// Flip the completion flag of the task with `id`. Emits no notice.
    /// Returns false when no such task exists.
    pub fn toggle_task_completion(&mut self, id: &TaskId) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|task| task.id() == id) else {
            debug!(task = %id, "Toggle skipped: unknown task");
            return false;
        };
        task.completed = !task.completed;
        debug!(task = %id, completed = task.completed, "Toggled task");

        self.rebuild_view();
        self.save_tasks();
        self.publish_view();
        true
    }

    /// Append a new category with a fresh id.
    pub fn add_category(&mut self, fields: NewCategory) -> CategoryId {
        let NewCategory { name, color } = fields;
        let id = CategoryId::generate();
        let notice = Notice::category_added(&name);
        self.categories.push(Category {
            id: id.clone(),
            name,
            color,
        });
        debug!(category = %id, "Added category");

        self.rebuild_view();
        self.save_categories();
        self.publish_view();
        self.notify(notice);
        id
    }

    /// Remove the category with `id` and mark every task referencing it
    /// uncategorized. Both collections are saved.
    pub fn delete_category(&mut self, id: &CategoryId) -> Option<Category> {
        let removed = self
            .categories
            .iter()
            .position(|category| category.id == *id)
            .map(|index| self.categories.remove(index));

        let mut cleared = 0_usize;
        for task in &mut self.tasks {
            if task.category.as_ref() == Some(id) {
                task.category = None;
                cleared += 1;
            }
        }
        debug!(category = %id, found = removed.is_some(), cleared, "Deleted category");
        let notice = Notice::category_deleted(removed.as_ref().map(|category| category.name.as_str()));

        self.rebuild_view();
        self.save_categories();
        self.save_tasks();
        self.publish_view();
        self.notify(notice);
        removed
    }

    /// Overwrite the filter fields present in `patch`. Not persisted.
    pub fn update_filter_options(&mut self, patch: FilterPatch) {
        self.filters.apply(patch);
        self.rebuild_view();
        self.publish_view();
    }

    /// Replace the sort option. Not persisted.
    pub fn update_sort_option(&mut self, option: SortOption) {
        self.sort = option;
        self.rebuild_view();
        self.publish_view();
    }

    /// Reset every filter to its default. The sort option is kept.
    pub fn clear_filters(&mut self) {
        self.filters = FilterOptions::default();
        self.rebuild_view();
        self.publish_view();
    }

    /// Rebuild the view against the clock's current day, e.g. after midnight.
    pub fn refresh(&mut self) {
        self.rebuild_view();
        self.publish_view();
    }

    fn rebuild_view(&mut self) {
        self.view = DerivedView::build(&self.tasks, &self.filters, self.sort, self.clock.today());
        debug!(
            visible = self.view.len(),
            total = self.tasks.len(),
            sort = %self.sort,
            "Rebuilt derived view"
        );
    }

    fn publish_view(&mut self) {
        self.observers.emit(&StoreEvent::ViewChanged);
    }

    fn notify(&mut self, notice: Notice) {
        self.observers.emit(&StoreEvent::Notice(notice));
    }

    fn save_tasks(&self) {
        self.save(CollectionKey::Tasks, encode_tasks(&self.tasks));
    }

    fn save_categories(&self) {
        self.save(CollectionKey::Categories, encode_categories(&self.categories));
    }

    fn save(&self, key: CollectionKey, encoded: Result<String, CodecError>) {
        let payload = match encoded {
            Ok(payload) => payload,
            Err(err) => {
                warn!(collection = %key, "Skipping save: {err}");
                return;
            }
        };
        match self.persistence.save(key, &payload) {
            Ok(()) => debug!(collection = %key, bytes = payload.len(), "Saved collection"),
            Err(err) => {
                let err: Error = err.into();
                warn!(collection = %key, "Failed to save collection: {err:#}");
            }
        }
    }
}

fn load_collection<P, T>(
    persistence: &P,
    key: CollectionKey,
    decode: fn(&str) -> Result<Vec<T>, CodecError>,
) -> Option<Vec<T>>
where
    P: Persistence,
{
    match persistence.load(key) {
        Ok(Some(payload)) => match decode(&payload) {
            Ok(items) => Some(items),
            Err(err) => {
                warn!(collection = %key, "Ignoring malformed stored collection: {err}");
                None
            }
        },
        Ok(None) => {
            debug!(collection = %key, "No stored collection");
            None
        }
        Err(err) => {
            let err: Error = err.into();
            warn!(collection = %key, "Failed to load collection: {err:#}");
            None
        }
    }
}
