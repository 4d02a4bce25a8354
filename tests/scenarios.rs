use chrono::NaiveDate;
use serde_json::json;
use std::sync::Arc;
use task_parser_core::{
    Client, ClientMatch, FixedClock, InMemoryRegistry, Intent, IntentParser, ParserConfig,
    Priority,
};

fn sunday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
}

fn parser(registry: Arc<InMemoryRegistry>) -> IntentParser {
    IntentParser::new(ParserConfig::default(), registry)
        .unwrap()
        .with_clock(Arc::new(FixedClock::on(sunday())))
}

fn registry() -> Arc<InMemoryRegistry> {
    Arc::new(InMemoryRegistry::with_clients(vec![
        Client::new(1, "Pérez"),
        Client::new(2, "Construcciones García"),
        Client::new(3, "Martínez"),
    ]))
}

#[test]
fn create_command_as_json() {
    let result = parser(registry()).parse("Crear tarea limpiar oficina mañana cliente Pérez");

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(
        json,
        json!({
            "intent": "CREATE",
            "confidence": result.confidence,
            "entities": {
                "client": {"id": 1, "name": "Pérez", "confidence": 1.0},
                "due_date": "2024-03-11",
                "title": "limpiar oficina"
            },
            "original_text": "crear tarea limpiar oficina mañana cliente pérez"
        })
    );
}

#[test]
fn tentative_client_asks_for_confirmation() {
    let result = parser(registry()).parse("nueva tarea urgente revisar obra cliente martines");

    assert_eq!(result.intent, Intent::Create);
    assert_eq!(result.entities.priority, Some(Priority::Urgent));
    let client = result.entities.client.unwrap();
    assert!(client.needs_confirmation());
    assert_eq!(client.id(), Some(3));

    let json = serde_json::to_value(&client).unwrap();
    assert_eq!(json["needs_confirmation"], true);
}

#[test]
fn unknown_client_then_registered() {
    let registry = registry();
    let parser = parser(Arc::clone(&registry));

    let first = parser.parse("crear tarea presupuesto cliente ruiz");
    assert_eq!(first.entities.client, Some(ClientMatch::unmatched("ruiz")));
    let json = serde_json::to_value(first.entities.client.unwrap()).unwrap();
    assert_eq!(json, json!({"name": "ruiz", "needs_creation": true}));

    let id = registry.add_client("Ruiz");
    let second = parser.parse("crear tarea presupuesto cliente ruiz");
    assert_eq!(second.entities.client.and_then(|c| c.id()), Some(id));
}

#[test]
fn list_for_a_calendar_date() {
    let result = parser(registry()).parse("mostrar tareas pendientes del 15 de marzo");

    assert_eq!(result.intent, Intent::List);
    assert_eq!(result.entities.due_date, NaiveDate::from_ymd_opt(2024, 3, 15));
    assert_eq!(result.entities.title, None);
}

#[test]
fn reschedule_to_a_weekday() {
    let result = parser(registry()).parse("Mover la tarea 7 al viernes");

    assert_eq!(result.intent, Intent::Reschedule);
    assert_eq!(result.entities.task_id, Some(7));
    assert_eq!(result.entities.due_date, NaiveDate::from_ymd_opt(2024, 3, 15));
}

#[test]
fn close_and_extend_by_number() {
    let parser = parser(registry());

    let close = parser.parse("cerrar tarea 42");
    assert_eq!(close.intent, Intent::Close);
    assert_eq!(close.entities.task_id, Some(42));

    let extend = parser.parse("ampliar tarea 3");
    assert_eq!(extend.intent, Intent::Extend);
    assert_eq!(
        serde_json::to_value(&extend.entities).unwrap(),
        json!({"task_id": 3})
    );
}

#[test]
fn gibberish_is_unknown_with_no_entities() {
    let result = parser(registry()).parse("   ¿qué tiempo hace hoy?  ");

    assert_eq!(result.intent, Intent::Unknown);
    assert_eq!(result.confidence, 0.0);
    assert_eq!(serde_json::to_value(&result.entities).unwrap(), json!({}));
    assert_eq!(result.original_text, "¿qué tiempo hace hoy?");
}
