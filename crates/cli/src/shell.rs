//! Menu-driven console shell.
//!
//! Thin presentation layer: prompts on stdout, reads stdin, calls the
//! store, renders the returned messages. All validation and persistence
//! live in the store.

use std::io::{self, BufRead, Write};

use roster_store::{Result as StoreResult, RosterStore, StudentRecord, StudentUpdate};

const MENU: &str = "\
Student Roster Management
  1. Add student
  2. Delete student
  3. Update student
  4. Query student
  5. List all students
  6. Exit";

/// Run the interactive menu loop over stdin until the user exits.
pub fn run(mut store: RosterStore) -> anyhow::Result<()> {
    run_loop(&mut store, &mut io::stdin().lock())
}

fn run_loop(store: &mut RosterStore, input: &mut impl BufRead) -> anyhow::Result<()> {
    loop {
        println!();
        println!("{MENU}");
        let Some(choice) = prompt(input, "Choice: ")? else {
            break;
        };

        match choice.trim() {
            "1" => add_student(store, input)?,
            "2" => delete_student(store, input)?,
            "3" => update_student(store, input)?,
            "4" => query_student(store, input)?,
            "5" => list_students(store),
            "6" => {
                println!("Goodbye.");
                break;
            }
            "" => {}
            other => println!("Unknown choice: {other}"),
        }
    }

    Ok(())
}

fn add_student(store: &mut RosterStore, input: &mut impl BufRead) -> io::Result<()> {
    let Some(id) = prompt(input, "Student id: ")? else {
        return Ok(());
    };
    let Some(name) = prompt(input, "Name: ")? else {
        return Ok(());
    };
    let Some(age) = prompt(input, "Age: ")? else {
        return Ok(());
    };
    let Some(major) = prompt(input, "Major: ")? else {
        return Ok(());
    };

    report(store.add(StudentRecord::new(id, name, age, major)));
    Ok(())
}

fn delete_student(store: &mut RosterStore, input: &mut impl BufRead) -> io::Result<()> {
    let Some(id) = prompt(input, "Id of the student to delete: ")? else {
        return Ok(());
    };

    report(store.remove(&id));
    Ok(())
}

fn update_student(store: &mut RosterStore, input: &mut impl BufRead) -> io::Result<()> {
    let Some(id) = prompt(input, "Id of the student to update: ")? else {
        return Ok(());
    };
    let Some(current) = store.get(&id).cloned() else {
        println!("Error: no student found with id '{id}'");
        return Ok(());
    };

    println!("Enter new values (press Enter to keep the current value):");
    let Some(name) = prompt(input, &format!("Name (current: {}): ", current.name))? else {
        return Ok(());
    };
    let Some(age) = prompt(input, &format!("Age (current: {}): ", current.age))? else {
        return Ok(());
    };
    let Some(major) = prompt(input, &format!("Major (current: {}): ", current.major))? else {
        return Ok(());
    };

    let update = StudentUpdate {
        name: non_empty(name),
        age: non_empty(age),
        major: non_empty(major),
    };
    if update.is_noop() {
        println!("Nothing entered, update cancelled.");
        return Ok(());
    }

    report(store.update(&id, update));
    Ok(())
}

fn query_student(store: &RosterStore, input: &mut impl BufRead) -> io::Result<()> {
    let Some(id) = prompt(input, "Id of the student to query: ")? else {
        return Ok(());
    };

    match store.get(&id) {
        Some(record) => {
            println!();
            println!("--- Student record ---");
            println!("Id:    {}", record.id);
            println!("Name:  {}", record.name);
            println!("Age:   {}", record.age);
            println!("Major: {}", record.major);
            println!("----------------------");
        }
        None => println!("Error: no student found with id '{id}'"),
    }
    Ok(())
}

fn list_students(store: &RosterStore) {
    if store.is_empty() {
        println!("The roster is empty.");
        return;
    }

    println!();
    println!("--- All students ---");
    for record in store.all() {
        println!(
            "Id: {}, Name: {}, Age: {}, Major: {}",
            record.id, record.name, record.age, record.major
        );
    }
    println!("--------------------");
}

/// Render a store result as user feedback.
fn report(result: StoreResult<String>) {
    match result {
        Ok(message) => println!("{message}"),
        Err(err) => println!("Error: {err}"),
    }
}

/// Print `label`, then read one line. `None` means EOF.
///
/// Only the line ending is stripped; interior and surrounding whitespace is
/// passed through to the store untouched.
fn prompt(input: &mut impl BufRead, label: &str) -> io::Result<Option<String>> {
    print!("{label}");
    io::stdout().flush()?;
    read_line(input)
}

fn read_line(input: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
    Ok(Some(line))
}

/// Empty input means "keep the current value".
fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}
