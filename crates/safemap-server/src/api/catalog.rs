use axum::{response::IntoResponse, Json};
use safemap_core::ContactRecord;

const CONTACTS: [(&str, &str, &str); 3] = [
    ("Disque 180", "180", "Central de Atendimento à Mulher"),
    ("Polícia Militar", "190", "Emergências"),
    ("SAMU", "192", "Atendimento médico de urgência"),
];

const TIPS: [&str; 3] = [
    "Compartilhe sua localização em tempo real com pessoas de confiança.",
    "Evite caminhar sozinha em áreas desertas à noite.",
    "Use apps de transporte com compartilhamento de rota.",
];

fn contacts() -> Vec<ContactRecord> {
    CONTACTS
        .iter()
        .map(|(name, phone, description)| ContactRecord {
            name: (*name).to_string(),
            phone: (*phone).to_string(),
            description: (*description).to_string(),
        })
        .collect()
}

pub(super) async fn list_contacts() -> impl IntoResponse {
    Json(contacts())
}

pub(super) async fn list_tips() -> impl IntoResponse {
    Json(TIPS)
}

#[cfg(test)]
mod tests {
    use safemap_core::{parse_collection, TipRecord};

    use super::*;

    #[test]
    fn served_catalogs_pass_client_validation() {
        let contacts = serde_json::to_value(contacts()).expect("serialize");
        assert_eq!(
            parse_collection::<ContactRecord>(&contacts)
                .expect("valid contacts")
                .len(),
            3
        );

        let tips = serde_json::to_value(TIPS).expect("serialize");
        assert_eq!(
            parse_collection::<TipRecord>(&tips).expect("valid tips").len(),
            3
        );
    }
}
