#![allow(clippy::expect_used, clippy::unwrap_used, missing_docs)]

use std::cell::RefCell;
use std::fs;
use std::rc::Rc;

use anyhow::Result;
use taskdeck_app::{
    AppConfig, CategoryPatch, FilterPatchBuilder, FixedClock, Notice, Severity, StoreEvent, TaskPatch,
    TaskStore,
};
use taskdeck_core::{
    Category, CategoryId, DueDateFilter, FilterPatch, NewCategory, NewTask, Priority, SortOption,
    StatusFilter,
};
use taskdeck_store::FileStore;
use tempfile::tempdir;
use time::macros::{date, datetime};

fn clock() -> FixedClock {
    FixedClock::new(datetime!(2024-01-07 12:00 UTC))
}

fn open(store: &FileStore) -> TaskStore<&FileStore, FixedClock> {
    TaskStore::open(store, clock(), &AppConfig::default())
}

#[test]
fn collections_survive_reopening() -> Result<()> {
    let dir = tempdir()?;
    let files = FileStore::open(dir.path())?;

    let (task_id, category_id) = {
        let mut store = open(&files);
        let category_id = store.add_category(NewCategory {
            name: "Garden".into(),
            color: "#2e8b57".into(),
        });
        let task_id = store.add_task(NewTask {
            description: "Roses and tulips".into(),
            due_date: Some(date!(2024 - 01 - 10)),
            priority: Priority::High,
            category: Some(category_id.clone()),
            ..NewTask::titled("Plant bulbs")
        });
        store.toggle_task_completion(&task_id);
        (task_id, category_id)
    };

    let reopened = open(&files);
    let task = reopened.task(&task_id).expect("task persisted");
    assert_eq!(task.title, "Plant bulbs");
    assert_eq!(task.description, "Roses and tulips");
    assert_eq!(task.due_date, Some(date!(2024 - 01 - 10)));
    assert_eq!(task.priority, Priority::High);
    assert!(task.completed);
    assert_eq!(task.category.as_ref(), Some(&category_id));
    assert_eq!(task.created_at(), datetime!(2024-01-07 12:00 UTC));
    assert_eq!(reopened.categories().len(), 5);
    Ok(())
}

#[test]
fn stored_records_use_flat_camel_case_fields() -> Result<()> {
    let dir = tempdir()?;
    let files = FileStore::open(dir.path())?;
    let mut store = open(&files);
    store.add_task(NewTask::titled("No due date"));

    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(dir.path().join("tasks.json"))?)?;
    let record = &raw[0];
    assert_eq!(record["title"], "No due date");
    assert_eq!(record["dueDate"], "");
    assert_eq!(record["category"], "");
    assert_eq!(record["priority"], "medium");
    assert_eq!(record["completed"], false);
    assert_eq!(record["createdAt"], "2024-01-07T12:00:00Z");
    Ok(())
}

#[test]
fn legacy_payloads_load_without_default_categories() -> Result<()> {
    let dir = tempdir()?;
    let files = FileStore::open(dir.path())?;
    files.save(
        "tasks",
        r#"[{"id":"k3j9x2","title":"Call mom","description":"","dueDate":"2024-01-07T00:00:00.000Z","priority":"low","completed":false,"category":"family","createdAt":"2024-01-01T08:00:00.000Z"}]"#,
    )?;
    files.save("categories", r##"[{"id":"family","name":"Family","color":"#ff8800"}]"##)?;

    let store = open(&files);
    assert_eq!(store.categories().len(), 1);
    assert_eq!(store.categories()[0].name, "Family");
    let task = &store.tasks()[0];
    assert_eq!(task.id().as_str(), "k3j9x2");
    assert_eq!(task.due_date, Some(date!(2024 - 01 - 07)));
    assert_eq!(store.active_filter_labels(), Vec::<String>::new());
    Ok(())
}

#[test]
fn deleting_a_category_uncategorizes_tasks_on_disk() -> Result<()> {
    let dir = tempdir()?;
    let files = FileStore::open(dir.path())?;
    let mut store = open(&files);
    let shopping = CategoryId::from("shopping");
    let id = store.add_task(NewTask {
        category: Some(shopping.clone()),
        ..NewTask::titled("Buy groceries")
    });
    store.update_task(
        &id,
        TaskPatch {
            description: Some("Go shopping".into()),
            ..TaskPatch::default()
        },
    );

    store.delete_category(&shopping);
    drop(store);

    let reopened = open(&files);
    assert!(reopened.category(&shopping).is_none());
    assert_eq!(reopened.task(&id).and_then(|task| task.category.clone()), None);
    assert_eq!(
        reopened.task(&id).map(|task| task.description.as_str()),
        Some("Go shopping")
    );
    Ok(())
}

#[test]
fn view_scenarios_end_to_end() -> Result<()> {
    let dir = tempdir()?;
    let files = FileStore::open(dir.path())?;
    let mut store = open(&files);

    let a = store.add_task(NewTask {
        priority: Priority::Low,
        due_date: Some(date!(2024 - 01 - 10)),
        ..NewTask::titled("A")
    });
    let b = store.add_task(NewTask {
        priority: Priority::High,
        due_date: Some(date!(2024 - 01 - 05)),
        ..NewTask::titled("B")
    });

    let order = |store: &TaskStore<&FileStore, FixedClock>| -> Vec<String> {
        store.view().iter().map(|task| task.title.clone()).collect()
    };

    store.update_sort_option(SortOption::PriorityDesc);
    assert_eq!(order(&store), vec!["B", "A"]);
    store.update_sort_option(SortOption::DueDateAsc);
    assert_eq!(order(&store), vec!["B", "A"]);

    // B is past due; once completed it no longer counts as overdue.
    let overdue = FilterPatchBuilder::new().with_due_date(Some("overdue"))?.build();
    store.update_filter_options(overdue);
    assert_eq!(order(&store), vec!["B"]);
    store.toggle_task_completion(&b);
    assert!(store.view().is_empty());

    store.update_filter_options(FilterPatch {
        due_date: Some(DueDateFilter::All),
        status: Some(StatusFilter::Pending),
        ..FilterPatch::default()
    });
    assert_eq!(order(&store), vec!["A"]);

    store.update_task(
        &a,
        TaskPatch {
            description: Some("Go shopping".into()),
            category: Some(CategoryPatch::Clear),
            ..TaskPatch::default()
        },
    );
    store.update_filter_options(FilterPatch {
        search_query: Some("shop".into()),
        ..FilterPatch::default()
    });
    assert_eq!(order(&store), vec!["A"]);

    store.clear_filters();
    assert_eq!(store.view().len(), 2);
    assert_eq!(store.sort_option(), SortOption::DueDateAsc);
    assert_eq!(store.stats().completed, 1);
    Ok(())
}

#[test]
fn observers_receive_notices_in_order() -> Result<()> {
    let dir = tempdir()?;
    let files = FileStore::open(dir.path())?;
    let mut store = open(&files);

    let seen: Rc<RefCell<Vec<Notice>>> = Rc::default();
    let sink = Rc::clone(&seen);
    store.subscribe(Box::new(move |event: &StoreEvent| {
        if let StoreEvent::Notice(notice) = event {
            sink.borrow_mut().push(notice.clone());
        }
    }));

    let id = store.add_task(NewTask::titled("Water plants"));
    store.update_task(&id, TaskPatch::default());
    store.toggle_task_completion(&id);
    store.delete_task(&id);
    store.delete_category(&CategoryId::from("nope"));

    let seen = seen.borrow();
    let titles: Vec<&str> = seen.iter().map(|notice| notice.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["Task added", "Task updated", "Task deleted", "Category deleted"]
    );
    assert_eq!(seen[2].description, "\"Water plants\" has been deleted.");
    assert_eq!(seen[2].severity, Severity::Destructive);
    assert_eq!(seen[3].description, "Category has been deleted.");
    Ok(())
}

#[test]
fn open_workdir_uses_configured_data_dir() -> Result<()> {
    let dir = tempdir()?;
    fs::create_dir_all(dir.path().join(".taskdeck"))?;
    fs::write(
        dir.path().join(".taskdeck/config.toml"),
        "[storage]\ndata_dir = \"db\"\n\n[view]\ndefault_sort = \"createdAt-desc\"\n",
    )?;

    let mut store = TaskStore::open_workdir(dir.path())?;
    assert_eq!(store.sort_option(), SortOption::CreatedAtDesc);
    assert_eq!(store.categories(), Category::defaults().as_slice());
    store.add_task(NewTask::titled("Check config"));
    assert!(dir.path().join("db/tasks.json").exists());
    Ok(())
}
