use bson::oid::ObjectId;
use cotizador_backend::model::draft::{DraftError, QuoteDraft};
use cotizador_backend::model::property::{ExtraItem, Property};
use cotizador_backend::model::quote::{AgentRef, ClientInfo, QuoteStatus};
use cotizador_backend::model::team::ServiceTeam;

fn demo_property() -> Property {
    Property {
        id: Some(ObjectId::new()),
        titulo: "Residencia Villa Magna".to_string(),
        descripcion: Some("Hermosa casa con acabados de lujo y jardín amplio.".to_string()),
        precio: 4_500_000.0,
        direccion: "Av. de las Lomas 123, Zona Real".to_string(),
        habitaciones: 4,
        banos: 3.5,
        metrosTerreno: 350.0,
        imagenes: vec!["https://example.com/fachada.jpg".to_string()],
        imagen: None,
        items: vec![
            ExtraItem {
                id: "i1".to_string(),
                nombre: "Muebles de Lujo".to_string(),
                costo: 250_000.0,
            },
            ExtraItem {
                id: "i2".to_string(),
                nombre: "Portón Eléctrico".to_string(),
                costo: 20_000.0,
            },
            ExtraItem {
                id: "i3".to_string(),
                nombre: "Jacuzzi Exterior".to_string(),
                costo: 150_000.0,
            },
        ],
        createdAt: Some("2025-06-01T12:00:00+00:00".to_string()),
    }
}

fn demo_team() -> ServiceTeam {
    ServiceTeam {
        id: Some(ObjectId::new()),
        nombre: "Constructora Alfa".to_string(),
        lider: "Ing. Mariana Solís".to_string(),
        duracionEstimada: "6 meses".to_string(),
        costoSemanal: 45_000.0,
        imagen: None,
        createdAt: None,
    }
}

fn demo_agent() -> AgentRef {
    AgentRef {
        uid: "agent-uid-1".to_string(),
        email: "vendedor@inmobiliaria.com".to_string(),
    }
}

fn demo_client() -> ClientInfo {
    ClientInfo {
        nombre: "Laura Medina".to_string(),
        telefono: "5512345678".to_string(),
        correo: "laura@example.com".to_string(),
    }
}

#[test]
fn test_creation_workflow_end_to_end() {
    let property = demo_property();
    let mut draft = QuoteDraft::from_property(&property);

    // Picker pre-selection followed by a manual toggle on the summary screen
    draft.set_selection(vec!["i1".to_string()]);
    draft.toggle_extra("i2");
    assert_eq!(draft.compute_total(), 4_770_000.0);

    draft.select_team(Some(demo_team()));
    draft.cliente = demo_client();

    let quote = draft
        .build_quote_record(&demo_agent())
        .expect("complete draft must build");

    assert_eq!(quote.total, 4_770_000.0);
    assert_eq!(quote.estado, QuoteStatus::Pendiente);
    assert_eq!(quote.propiedad.precioBase, 4_500_000.0);
    assert_eq!(
        quote.propiedad.imagen.as_deref(),
        Some("https://example.com/fachada.jpg")
    );
    assert_eq!(quote.itemsAdicionales.len(), 2);
    assert_eq!(quote.agente.email, "vendedor@inmobiliaria.com");
    // The team's weekly cost never feeds the total
    assert_eq!(
        quote.equipoDesarrollo.as_ref().map(|e| e.costoSemanal),
        Some(45_000.0)
    );
}

#[test]
fn test_validation_gates_every_required_field() {
    let property = demo_property();
    let agent = demo_agent();

    let mut draft = QuoteDraft::from_property(&property);
    draft.select_team(Some(demo_team()));

    // All three client fields empty: the first one is reported
    assert_eq!(
        draft.build_quote_record(&agent),
        Err(DraftError::MissingClientField("nombre"))
    );

    draft.cliente = demo_client();
    draft.cliente.correo = String::new();
    assert_eq!(
        draft.build_quote_record(&agent),
        Err(DraftError::MissingClientField("correo"))
    );

    draft.cliente = demo_client();
    draft.select_team(None);
    assert_eq!(draft.build_quote_record(&agent), Err(DraftError::NoTeamSelected));

    draft.select_team(Some(demo_team()));
    assert!(draft.build_quote_record(&agent).is_ok());
}

#[test]
fn test_failed_validation_preserves_draft_state() {
    let property = demo_property();
    let mut draft = QuoteDraft::from_property(&property);
    draft.toggle_extra("i3");

    let before_selection = draft.selected_ids().to_vec();
    let before_total = draft.compute_total();

    assert!(draft.build_quote_record(&demo_agent()).is_err());

    // Nothing was cleared; the operator can fill the form and retry
    assert_eq!(draft.selected_ids(), before_selection.as_slice());
    assert_eq!(draft.compute_total(), before_total);
}

#[test]
fn test_revision_workflow_matches_creation_totals() {
    let property = demo_property();
    let mut draft = QuoteDraft::from_property(&property);
    draft.set_selection(vec!["i1".to_string(), "i3".to_string()]);
    draft.select_team(Some(demo_team()));
    draft.cliente = demo_client();
    let saved = draft.build_quote_record(&demo_agent()).expect("valid draft");

    // Re-open from the persisted record, as the detail screen does
    let mut revision = QuoteDraft::from_quote(&saved);
    assert_eq!(revision.compute_total(), saved.total);

    // Deselect the jacuzzi and confirm the quote
    revision.toggle_extra("i3");
    revision.estado = QuoteStatus::Confirmada;
    let update = revision.build_quote_update();

    assert_eq!(update.total, 4_750_000.0);
    assert_eq!(update.estado, QuoteStatus::Confirmada);
    assert_eq!(update.itemsAdicionales.len(), 1);
    assert_eq!(update.itemsAdicionales[0].id, "i1");
}

#[test]
fn test_revision_candidates_are_the_saved_snapshot() {
    let property = demo_property();
    let mut draft = QuoteDraft::from_property(&property);
    draft.set_selection(vec!["i1".to_string()]);
    draft.select_team(Some(demo_team()));
    draft.cliente = demo_client();
    let saved = draft.build_quote_record(&demo_agent()).expect("valid draft");

    // Items deselected before the first save are gone as candidates, so
    // re-selecting one of them cannot change the total
    let mut revision = QuoteDraft::from_quote(&saved);
    revision.toggle_extra("i2");
    assert_eq!(revision.compute_total(), saved.total);
}

#[test]
fn test_status_moves_freely_between_states() {
    let property = demo_property();
    let mut draft = QuoteDraft::from_property(&property);
    draft.select_team(Some(demo_team()));
    draft.cliente = demo_client();
    let saved = draft.build_quote_record(&demo_agent()).expect("valid draft");
    assert_eq!(saved.estado, QuoteStatus::Pendiente);

    // No transition graph: pagada may go back to pendiente
    let mut revision = QuoteDraft::from_quote(&saved);
    revision.estado = QuoteStatus::Pagada;
    assert_eq!(revision.build_quote_update().estado, QuoteStatus::Pagada);
    revision.estado = QuoteStatus::Pendiente;
    assert_eq!(revision.build_quote_update().estado, QuoteStatus::Pendiente);
}

#[test]
fn test_catalog_reconciliation_rules() {
    let property = demo_property();
    let mut draft = QuoteDraft::from_property(&property);
    draft.set_selection(vec!["i1".to_string(), "i2".to_string()]);

    // Removing an extra from the owning property deselects it in the draft
    draft.remove_candidate("i2");
    assert_eq!(draft.selected_ids(), ["i1".to_string()].as_slice());
    assert_eq!(draft.compute_total(), 4_750_000.0);

    // Deleting the assigned team clears the draft's selection
    let team = demo_team();
    let team_id = team.id.expect("demo team id");
    draft.select_team(Some(team));
    draft.team_deleted(&team_id);
    assert!(draft.equipo.is_none());
}

#[test]
fn test_update_payload_never_touches_frozen_snapshots() {
    let property = demo_property();
    let mut draft = QuoteDraft::from_property(&property);
    draft.set_selection(vec!["i1".to_string()]);
    draft.select_team(Some(demo_team()));
    draft.cliente = demo_client();
    let saved = draft.build_quote_record(&demo_agent()).expect("valid draft");

    let mut revision = QuoteDraft::from_quote(&saved);
    revision.cliente.nombre = "Otro Cliente".to_string();
    let update = revision.build_quote_update();

    // What gets $set on the document carries neither snapshot
    let document = serde_json::to_value(&update).expect("serializable update");
    let keys = document.as_object().expect("object payload");
    assert!(!keys.contains_key("propiedad"));
    assert!(!keys.contains_key("agente"));
    assert!(!keys.contains_key("fecha"));
    assert!(keys.contains_key("cliente"));
    assert!(keys.contains_key("total"));
}

#[test]
fn test_status_serialization_uses_document_values() {
    let all = [
        (QuoteStatus::Pendiente, "pendiente"),
        (QuoteStatus::Confirmada, "confirmada"),
        (QuoteStatus::Construccion, "construcción"),
        (QuoteStatus::Pagada, "pagada"),
    ];
    for (estado, expected) in all {
        let serialized = serde_json::to_string(&estado).expect("serializable");
        assert_eq!(serialized, format!("\"{}\"", expected));
        let parsed: QuoteStatus =
            serde_json::from_str(&serialized).expect("round trip");
        assert_eq!(parsed, estado);
    }
}
