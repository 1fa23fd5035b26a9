use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ============ Token Endpoint ============

/// Body of a successful client-credentials exchange. Other fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
}

impl TokenResponse {
    /// The bearer token, if present and non-empty.
    pub fn token(self) -> Option<String> {
        self.access_token.filter(|t| !t.trim().is_empty())
    }
}

// ============ Establishment Endpoint ============

/// Subset of the `/siret/{siret}` response we read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EtablissementResponse {
    #[serde(default)]
    pub etablissement: Option<Etablissement>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Etablissement {
    #[serde(rename = "uniteLegale", default)]
    pub unite_legale: Option<UniteLegale>,
}

/// Legal-unit attributes. JSON `null` and missing keys both land as `None`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UniteLegale {
    #[serde(rename = "activitePrincipale", default)]
    pub activite_principale: Option<String>,
    #[serde(rename = "nomenclatureActivitePrincipale", default)]
    pub nomenclature_activite_principale: Option<String>,
    #[serde(rename = "denominationUniteLegale", default)]
    pub denomination: Option<String>,
}

// ============ Relay Responses ============

/// Simplified payload returned to the mobile client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LookupResult {
    /// NAF activity code.
    pub naf_code: String,
    /// NAF nomenclature the code belongs to.
    pub naf_label: String,
    /// Legal name of the unit.
    pub name: String,
}

impl From<EtablissementResponse> for LookupResult {
    fn from(response: EtablissementResponse) -> Self {
        let unite = response
            .etablissement
            .and_then(|e| e.unite_legale)
            .unwrap_or_default();

        Self {
            naf_code: unite.activite_principale.unwrap_or_default(),
            naf_label: unite.nomenclature_activite_principale.unwrap_or_default(),
            name: unite.denomination.unwrap_or_default(),
        }
    }
}

/// Error payload: `{"detail": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub detail: String,
}
