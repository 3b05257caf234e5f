mod support;

use flightgraph_core::{Airport, FlightService, RepoError, DEFAULT_LIMIT};
use serde_json::json;
use support::{airport_json, flight_json, MemoryStore};

fn seeded_store(airports: usize, flights: usize) -> MemoryStore {
    let store = MemoryStore::new();
    for i in 0..airports {
        store.insert(
            "airports",
            &format!("A{i:03}"),
            airport_json(&format!("Airport {i}"), "Somewhere", "CA"),
        );
    }
    for i in 0..flights {
        store.insert(
            "flights",
            &format!("{}", 350_000 + i),
            flight_json(i as i32, "LAX", "SFO"),
        );
    }
    store
}

#[test]
fn airport_by_key_returns_document_with_metadata() {
    let store = MemoryStore::new();
    store.insert("airports", "M75", airport_json("Malad City", "Malad City", "ID"));
    let service = FlightService::new(store);

    let record = service.airport_by_key("M75").unwrap();
    assert_eq!(record.meta.key, "M75");
    assert_eq!(record.meta.id, "airports/M75");
    assert_eq!(record.document.airport, "Malad City");
    assert_eq!(record.document.state, "ID");
}

#[test]
fn flight_by_key_decodes_edge_endpoints() {
    let store = MemoryStore::new();
    store.insert("flights", "350814", flight_json(1016, "LAX", "SFO"));
    let service = FlightService::new(store);

    let record = service.flight_by_key("350814").unwrap();
    assert_eq!(record.meta.key, "350814");
    assert_eq!(record.document.flight_num, 1016);
    assert_eq!(record.document.from.as_deref(), Some("airports/LAX"));
    assert_eq!(record.document.to.as_deref(), Some("airports/SFO"));
}

#[test]
fn missing_airport_is_reported_as_not_found() {
    let service = FlightService::new(MemoryStore::new());

    let err = service.airport_by_key("NOPE").unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound { ref collection, ref key } if collection == "airports" && key == "NOPE"
    ));
}

#[test]
fn flight_lookup_failures_propagate_instead_of_printing_defaults() {
    let service = FlightService::new(MemoryStore::new());
    let err = service.flight_by_key("350814").unwrap_err();
    assert!(matches!(err, RepoError::NotFound { .. }));

    let store = MemoryStore::new();
    store.insert("flights", "350814", flight_json(1016, "LAX", "SFO"));
    store.fail_reads_of("flights");
    let service = FlightService::new(store);
    let err = service.flight_by_key("350814").unwrap_err();
    assert!(matches!(err, RepoError::Db(_)));
    assert!(err.to_string().contains("503"));
}

#[test]
fn missing_and_null_fields_decode_as_zero_values() {
    let store = MemoryStore::new();
    store.insert(
        "airports",
        "XYZ",
        json!({ "airport": "No state", "city": null, "lat": 41.5 }),
    );
    let mut flight = flight_json(1016, "LAX", "SFO");
    flight["TailNum"] = json!(null);
    flight["DepTime"] = json!(null);
    flight["ArrTimeUTC"] = json!(null);
    flight.as_object_mut().unwrap().remove("Distance");
    store.insert("flights", "350814", flight);
    let service = FlightService::new(store);

    let airport = service.airport_by_key("XYZ").unwrap().document;
    assert_eq!(airport.airport, "No state");
    assert_eq!(airport.city, "");
    assert_eq!(airport.state, "");
    assert_eq!(airport.lat, 41.5);
    assert_eq!(airport.long, 0.0);

    let flight = service.flight_by_key("350814").unwrap().document;
    assert_eq!(flight.flight_num, 1016);
    assert_eq!(flight.tail_num, "");
    assert_eq!(flight.dep_time, 0);
    assert_eq!(flight.distance, 0);
    assert_eq!(flight.arr_time_utc.timestamp(), 0);
}

#[test]
fn mistyped_field_is_invalid_data() {
    let store = MemoryStore::new();
    store.insert(
        "airports",
        "BAD",
        json!({ "airport": "Somewhere", "lat": "north" }),
    );
    let service = FlightService::new(store);

    let err = service.airport_by_key("BAD").unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn non_positive_listing_counts_use_default_limit() {
    let service = FlightService::new(seeded_store(150, 150));

    for requested in [0, -1, -100] {
        assert_eq!(
            service.first_airports(requested).unwrap().len() as u64,
            DEFAULT_LIMIT
        );
        assert_eq!(
            service.first_flights(requested).unwrap().len() as u64,
            DEFAULT_LIMIT
        );
    }

    for (query, bind_vars) in service.store().executed_queries() {
        assert!(query.contains("LIMIT @n"));
        assert_eq!(bind_vars["n"], json!(20));
    }
}

#[test]
fn positive_listing_counts_are_used_verbatim() {
    let service = FlightService::new(seeded_store(150, 150));

    for requested in [1_i64, 10, 100] {
        let airports = service.first_airports(requested).unwrap();
        assert_eq!(airports.len() as i64, requested);
        let flights = service.first_flights(requested).unwrap();
        assert_eq!(flights.len() as i64, requested);
    }

    let bound: Vec<_> = service
        .store()
        .executed_queries()
        .into_iter()
        .map(|(_, vars)| vars["n"].clone())
        .collect();
    assert_eq!(
        bound,
        vec![json!(1), json!(1), json!(10), json!(10), json!(100), json!(100)]
    );
}

#[test]
fn listing_rows_carry_their_own_metadata() {
    let service = FlightService::new(seeded_store(3, 0));

    let airports = service.first_airports(0).unwrap();
    let keys: Vec<_> = airports.iter().map(|record| record.meta.key.as_str()).collect();
    assert_eq!(keys, vec!["A000", "A001", "A002"]);
}

#[test]
fn state_counts_are_keyed_by_state() {
    let store = MemoryStore::new();
    store.script(
        "COLLECT state = a.state",
        vec![
            json!({"state": "CA", "counter": 29}),
            json!({"state": "TX", "counter": 24}),
            json!({"state": null, "counter": 3}),
        ],
    );
    let service = FlightService::new(store);

    let counts = service.airport_count_per_state().unwrap();
    assert_eq!(counts.len(), 3);
    assert_eq!(counts["CA"], 29);
    assert_eq!(counts["TX"], 24);
    assert_eq!(counts[""], 3);

    let queries = service.store().executed_queries();
    assert_eq!(queries.len(), 1);
    assert!(queries[0].0.contains("WITH COUNT INTO counter"));
    assert!(queries[0].1.is_empty());
}

#[test]
fn null_and_empty_states_share_one_count() {
    let store = MemoryStore::new();
    store.script(
        "COLLECT state = a.state",
        vec![
            json!({"state": null, "counter": 3}),
            json!({"state": "", "counter": 2}),
            json!({"state": "OH", "counter": 7}),
        ],
    );
    let service = FlightService::new(store);

    let counts = service.airport_count_per_state().unwrap();
    assert_eq!(counts.len(), 2);
    assert_eq!(counts[""], 5);
    assert_eq!(counts["OH"], 7);
    assert_eq!(counts.values().sum::<u64>(), 12);
}

#[test]
fn outbound_traversal_binds_start_vertex_and_limit() {
    let store = MemoryStore::new();
    store.script(
        "OUTBOUND @airportCode flights",
        vec![json!({
            "a": airport_json("San Francisco International", "San Francisco", "CA"),
            "f": flight_json(1016, "LAX", "SFO"),
        })],
    );
    let service = FlightService::new(store);

    let legs = service.flights_from_airport("LAX", 20).unwrap();
    assert_eq!(legs.len(), 1);
    assert_eq!(legs[0].airport.city, "San Francisco");
    assert_eq!(legs[0].flight.to.as_deref(), Some("airports/SFO"));

    let queries = service.store().executed_queries();
    let (query, bind_vars) = &queries[0];
    assert!(query.contains("LIMIT @count"));
    assert_eq!(bind_vars["airportCode"], json!("airports/LAX"));
    assert_eq!(bind_vars["count"], json!(20));
}

#[test]
fn outbound_traversal_with_non_positive_count_binds_default_limit() {
    let service = FlightService::new(MemoryStore::new());

    for requested in [0, -3] {
        service.flights_from_airport("LAX", requested).unwrap();
    }

    for (_, bind_vars) in service.store().executed_queries() {
        assert_eq!(bind_vars["count"], json!(DEFAULT_LIMIT));
    }
}

#[test]
fn outbound_traversal_rejects_unsafe_codes_before_querying() {
    let service = FlightService::new(MemoryStore::new());

    let err = service.flights_from_airport("LAX/../x", 5).unwrap_err();
    assert!(matches!(err, RepoError::InvalidKey(_)));
    assert!(service.store().executed_queries().is_empty());
}

#[test]
fn inserted_airport_reads_back_identically() {
    let service = FlightService::new(MemoryStore::new());
    let airport = Airport::demo();

    let (meta, reloaded) = service.insert_and_reload(&airport).unwrap();
    assert_eq!(reloaded.meta, meta);
    assert_eq!(meta.id, format!("airports/{}", meta.key));
    assert_eq!(reloaded.document, airport);
    assert_eq!(service.store().document_count("airports"), 1);
}

#[test]
fn each_insert_gets_a_fresh_key() {
    let service = FlightService::new(MemoryStore::new());

    let first = service.create_airport(&Airport::demo()).unwrap();
    let second = service.create_airport(&Airport::demo()).unwrap();
    assert_ne!(first.key, second.key);
    assert_eq!(service.store().document_count("airports"), 2);
}
