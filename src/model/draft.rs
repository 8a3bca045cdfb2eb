use bson::oid::ObjectId;
use tracing::debug;

use crate::model::property::{ExtraItem, Property};
use crate::model::quote::{
    AgentRef, ClientInfo, PropertySnapshot, Quote, QuoteStatus, QuoteUpdate,
};
use crate::model::team::ServiceTeam;

/// Validation failures raised when a draft is turned into a persistable
/// record. The draft itself is left untouched so the operator can correct
/// and retry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    #[error("Missing required client field: {0}")]
    MissingClientField(&'static str),
    #[error("No development team selected")]
    NoTeamSelected,
}

/// In-memory working state of a quote being created or revised.
///
/// Both flows share this one type: creation opens a draft from a catalog
/// property, revision re-opens one from the saved quote. Every screen that
/// shows a running total goes through [`QuoteDraft::compute_total`], so the
/// two flows cannot drift apart.
#[derive(Debug, Clone)]
pub struct QuoteDraft {
    /// Frozen at draft-open time; immutable for the life of the draft.
    pub propiedad: PropertySnapshot,
    /// Full candidate extra list the selection is resolved against.
    candidatos: Vec<ExtraItem>,
    /// Ids of the currently selected extras, in selection order.
    seleccionados: Vec<String>,
    pub equipo: Option<ServiceTeam>,
    pub cliente: ClientInfo,
    pub estado: QuoteStatus,
}

impl QuoteDraft {
    /// Opens a creation draft from a catalog property. Selection starts
    /// empty and the status is fixed to `pendiente`.
    pub fn from_property(property: &Property) -> Self {
        QuoteDraft {
            propiedad: PropertySnapshot {
                id: property
                    .id
                    .map(|oid| oid.to_hex())
                    .unwrap_or_default(),
                titulo: property.titulo.clone(),
                direccion: property.direccion.clone(),
                precioBase: property.precio,
                imagen: property.cover_image(),
            },
            candidatos: property.items.clone(),
            seleccionados: Vec::new(),
            equipo: None,
            cliente: ClientInfo::default(),
            estado: QuoteStatus::Pendiente,
        }
    }

    /// Re-opens a saved quote for revision. The candidate list is the extras
    /// snapshot stored on the quote, so items deselected before the first
    /// save are no longer offered as candidates.
    pub fn from_quote(quote: &Quote) -> Self {
        QuoteDraft {
            propiedad: quote.propiedad.clone(),
            seleccionados: quote
                .itemsAdicionales
                .iter()
                .map(|item| item.id.clone())
                .collect(),
            candidatos: quote.itemsAdicionales.clone(),
            equipo: quote.equipoDesarrollo.clone(),
            cliente: quote.cliente.clone(),
            estado: quote.estado,
        }
    }

    pub fn candidates(&self) -> &[ExtraItem] {
        &self.candidatos
    }

    pub fn selected_ids(&self) -> &[String] {
        &self.seleccionados
    }

    /// Flips membership of `id` in the selection. Always succeeds: ids
    /// missing from the candidate list are still recorded, they simply
    /// contribute nothing to the total because the total is resolved
    /// against the candidate list.
    pub fn toggle_extra(&mut self, id: &str) {
        if let Some(pos) = self.seleccionados.iter().position(|sel| sel == id) {
            self.seleccionados.remove(pos);
        } else {
            self.seleccionados.push(id.to_string());
        }
    }

    /// Replaces the selection wholesale, e.g. when a draft is pre-populated
    /// from an upstream picker.
    pub fn set_selection(&mut self, ids: Vec<String>) {
        self.seleccionados = ids;
    }

    /// Replaces the selected team wholesale. Any team object is accepted;
    /// there is no roster validation.
    pub fn select_team(&mut self, equipo: Option<ServiceTeam>) {
        self.equipo = equipo;
    }

    /// Drops a candidate extra, e.g. after it was removed from the owning
    /// property, and deselects it in the same step.
    pub fn remove_candidate(&mut self, id: &str) {
        self.candidatos.retain(|item| item.id != id);
        self.seleccionados.retain(|sel| sel != id);
    }

    /// Clears the team selection if the deleted team is the one currently
    /// assigned to this draft.
    pub fn team_deleted(&mut self, team_id: &ObjectId) {
        let matches = self
            .equipo
            .as_ref()
            .and_then(|equipo| equipo.id.as_ref())
            .map(|id| id == team_id)
            .unwrap_or(false);
        if matches {
            debug!(team_id = %team_id, "Clearing deleted team from draft");
            self.equipo = None;
        }
    }

    /// Base price plus the cost of every candidate whose id is selected.
    ///
    /// The sum runs over the candidate list filtered by membership, never
    /// over a separately held list of selected objects, so a cost edited in
    /// the candidate list is reflected even if the selection was captured
    /// earlier. The team's weekly cost is not part of the total.
    pub fn compute_total(&self) -> f64 {
        let extras: f64 = self
            .candidatos
            .iter()
            .filter(|item| self.seleccionados.contains(&item.id))
            .map(|item| item.costo)
            .sum();
        self.propiedad.precioBase + extras
    }

    fn selected_items(&self) -> Vec<ExtraItem> {
        self.candidatos
            .iter()
            .filter(|item| self.seleccionados.contains(&item.id))
            .cloned()
            .collect()
    }

    fn validate_client(&self) -> Result<(), DraftError> {
        if self.cliente.nombre.trim().is_empty() {
            return Err(DraftError::MissingClientField("nombre"));
        }
        if self.cliente.telefono.trim().is_empty() {
            return Err(DraftError::MissingClientField("telefono"));
        }
        if self.cliente.correo.trim().is_empty() {
            return Err(DraftError::MissingClientField("correo"));
        }
        Ok(())
    }

    /// Produces the record for the initial save. Fails without side effects
    /// when a required client field is blank or no team is selected.
    pub fn build_quote_record(&self, agente: &AgentRef) -> Result<Quote, DraftError> {
        self.validate_client()?;
        let equipo = self.equipo.clone().ok_or(DraftError::NoTeamSelected)?;

        Ok(Quote {
            id: None,
            agente: agente.clone(),
            cliente: self.cliente.clone(),
            propiedad: self.propiedad.clone(),
            itemsAdicionales: self.selected_items(),
            equipoDesarrollo: Some(equipo),
            total: self.compute_total(),
            estado: QuoteStatus::Pendiente,
            fecha: None,
        })
    }

    /// Produces the partial record for a revision. Update is a trusted
    /// in-place edit, so no field validation applies; the property and
    /// agent snapshots stay whatever was saved at creation.
    pub fn build_quote_update(&self) -> QuoteUpdate {
        QuoteUpdate {
            cliente: self.cliente.clone(),
            equipoDesarrollo: self.equipo.clone(),
            estado: self.estado,
            itemsAdicionales: self.selected_items(),
            total: self.compute_total(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extra(id: &str, nombre: &str, costo: f64) -> ExtraItem {
        ExtraItem {
            id: id.to_string(),
            nombre: nombre.to_string(),
            costo,
        }
    }

    fn villa_magna() -> Property {
        Property {
            id: Some(ObjectId::new()),
            titulo: "Residencia Villa Magna".to_string(),
            descripcion: None,
            precio: 4_500_000.0,
            direccion: "Av. de las Lomas 123, Zona Real".to_string(),
            habitaciones: 4,
            banos: 3.5,
            metrosTerreno: 350.0,
            imagenes: vec!["https://example.com/villa.jpg".to_string()],
            imagen: None,
            items: vec![
                extra("i1", "Muebles de Lujo", 250_000.0),
                extra("i2", "Portón Eléctrico", 20_000.0),
            ],
            createdAt: None,
        }
    }

    fn equipo_alfa() -> ServiceTeam {
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

    fn cliente_completo() -> ClientInfo {
        ClientInfo {
            nombre: "Laura Medina".to_string(),
            telefono: "5512345678".to_string(),
            correo: "laura@example.com".to_string(),
        }
    }

    #[test]
    fn test_total_matches_selection() {
        let property = villa_magna();
        let mut draft = QuoteDraft::from_property(&property);
        assert_eq!(draft.compute_total(), 4_500_000.0);

        draft.toggle_extra("i1");
        assert_eq!(draft.compute_total(), 4_750_000.0);

        draft.toggle_extra("i2");
        assert_eq!(draft.compute_total(), 4_770_000.0);
    }

    #[test]
    fn test_toggle_twice_restores_selection() {
        let property = villa_magna();
        let mut draft = QuoteDraft::from_property(&property);
        draft.toggle_extra("i1");
        let before = draft.selected_ids().to_vec();

        draft.toggle_extra("i2");
        draft.toggle_extra("i2");
        assert_eq!(draft.selected_ids(), before.as_slice());
    }

    #[test]
    fn test_unknown_id_contributes_nothing() {
        let property = villa_magna();
        let mut draft = QuoteDraft::from_property(&property);
        draft.toggle_extra("no-such-item");
        assert!(draft.selected_ids().contains(&"no-such-item".to_string()));
        assert_eq!(draft.compute_total(), 4_500_000.0);
    }

    #[test]
    fn test_deselecting_everything_leaves_base_price() {
        let property = villa_magna();
        let mut draft = QuoteDraft::from_property(&property);
        draft.toggle_extra("i1");
        draft.toggle_extra("i2");
        draft.toggle_extra("i1");
        draft.toggle_extra("i2");
        assert_eq!(draft.compute_total(), property.precio);
    }

    #[test]
    fn test_cost_edit_in_candidate_list_is_reflected() {
        let property = villa_magna();
        let mut draft = QuoteDraft::from_property(&property);
        draft.toggle_extra("i1");
        draft.candidatos[0].costo = 300_000.0;
        assert_eq!(draft.compute_total(), 4_800_000.0);
    }

    #[test]
    fn test_build_record_requires_client_fields() {
        let property = villa_magna();
        let mut draft = QuoteDraft::from_property(&property);
        draft.select_team(Some(equipo_alfa()));
        draft.cliente = cliente_completo();
        draft.cliente.telefono = "   ".to_string();

        let agente = AgentRef {
            uid: "agent-1".to_string(),
            email: "agente@inmobiliaria.com".to_string(),
        };
        assert_eq!(
            draft.build_quote_record(&agente),
            Err(DraftError::MissingClientField("telefono"))
        );
    }

    #[test]
    fn test_build_record_requires_team() {
        let property = villa_magna();
        let mut draft = QuoteDraft::from_property(&property);
        draft.cliente = cliente_completo();

        let agente = AgentRef {
            uid: "agent-1".to_string(),
            email: "agente@inmobiliaria.com".to_string(),
        };
        assert_eq!(
            draft.build_quote_record(&agente),
            Err(DraftError::NoTeamSelected)
        );
    }

    #[test]
    fn test_build_record_snapshots_draft_state() {
        let property = villa_magna();
        let mut draft = QuoteDraft::from_property(&property);
        draft.toggle_extra("i1");
        draft.select_team(Some(equipo_alfa()));
        draft.cliente = cliente_completo();

        let agente = AgentRef {
            uid: "agent-1".to_string(),
            email: "agente@inmobiliaria.com".to_string(),
        };
        let quote = draft.build_quote_record(&agente).expect("valid draft");

        assert_eq!(quote.agente, agente);
        assert_eq!(quote.propiedad.precioBase, 4_500_000.0);
        assert_eq!(quote.propiedad.titulo, "Residencia Villa Magna");
        assert_eq!(quote.itemsAdicionales.len(), 1);
        assert_eq!(quote.itemsAdicionales[0].id, "i1");
        assert_eq!(quote.total, 4_750_000.0);
        assert_eq!(quote.estado, QuoteStatus::Pendiente);
    }

    #[test]
    fn test_revision_reaches_same_total_as_creation() {
        let property = villa_magna();
        let mut draft = QuoteDraft::from_property(&property);
        draft.toggle_extra("i1");
        draft.toggle_extra("i2");
        draft.select_team(Some(equipo_alfa()));
        draft.cliente = cliente_completo();

        let agente = AgentRef {
            uid: "agent-1".to_string(),
            email: "agente@inmobiliaria.com".to_string(),
        };
        let quote = draft.build_quote_record(&agente).expect("valid draft");

        let revision = QuoteDraft::from_quote(&quote);
        assert_eq!(revision.compute_total(), quote.total);
        assert_eq!(revision.build_quote_update().total, quote.total);
    }

    #[test]
    fn test_update_recomputes_total_after_deselection() {
        let property = villa_magna();
        let mut draft = QuoteDraft::from_property(&property);
        draft.toggle_extra("i1");
        draft.toggle_extra("i2");
        draft.select_team(Some(equipo_alfa()));
        draft.cliente = cliente_completo();
        let agente = AgentRef {
            uid: "agent-1".to_string(),
            email: "agente@inmobiliaria.com".to_string(),
        };
        let quote = draft.build_quote_record(&agente).expect("valid draft");

        let mut revision = QuoteDraft::from_quote(&quote);
        revision.toggle_extra("i2");
        let update = revision.build_quote_update();
        assert_eq!(update.total, 4_750_000.0);
        assert_eq!(update.itemsAdicionales.len(), 1);
    }

    #[test]
    fn test_update_allows_blank_client_and_no_team() {
        let property = villa_magna();
        let mut revision = QuoteDraft::from_property(&property);
        revision.estado = QuoteStatus::Pagada;
        let update = revision.build_quote_update();
        assert_eq!(update.estado, QuoteStatus::Pagada);
        assert!(update.equipoDesarrollo.is_none());
    }

    #[test]
    fn test_remove_candidate_also_deselects() {
        let property = villa_magna();
        let mut draft = QuoteDraft::from_property(&property);
        draft.toggle_extra("i1");
        draft.remove_candidate("i1");
        assert!(draft.selected_ids().is_empty());
        assert!(!draft.candidates().iter().any(|item| item.id == "i1"));
        assert_eq!(draft.compute_total(), property.precio);
    }

    #[test]
    fn test_team_deleted_clears_matching_selection_only() {
        let property = villa_magna();
        let mut draft = QuoteDraft::from_property(&property);
        let equipo = equipo_alfa();
        let equipo_id = equipo.id.expect("seeded id");
        draft.select_team(Some(equipo.clone()));

        draft.team_deleted(&ObjectId::new());
        assert!(draft.equipo.is_some());

        draft.team_deleted(&equipo_id);
        assert!(draft.equipo.is_none());
    }
}
