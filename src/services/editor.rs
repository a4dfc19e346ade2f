// src/services/editor.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::lead::{Lead, LeadFields},
};

/// Como o modo edição aponta para um lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadRef {
    /// Id estável, gerado na criação.
    Id(Uuid),
    /// Posição no conjunto completo (não filtrado). Só vale durante a sessão.
    Position(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub enum LeadCommand {
    New(LeadFields),
    Edit { target: LeadRef, fields: LeadFields },
}

pub fn resolve(leads: &[Lead], target: LeadRef) -> Option<usize> {
    match target {
        LeadRef::Id(id) => leads.iter().position(|lead| lead.id == id),
        LeadRef::Position(index) => (index < leads.len()).then_some(index),
    }
}

/// Aplica um comando ao conjunto completo e devolve o lead gravado.
///
/// `New` acrescenta no fim. `Edit` substitui a linha inteira e mantém o id;
/// se o alvo não existir nada é alterado e o erro volta para quem chamou.
pub fn apply(leads: &mut Vec<Lead>, command: LeadCommand) -> Result<Lead, AppError> {
    match command {
        LeadCommand::New(fields) => {
            let lead = Lead::new(fields);
            tracing::info!("Novo lead {} ({})", lead.id, lead.fields.name);
            leads.push(lead.clone());
            Ok(lead)
        }
        LeadCommand::Edit { target, fields } => {
            let index = resolve(leads, target).ok_or(AppError::LeadNotFound)?;
            let lead = &mut leads[index];
            lead.replace_fields(fields);
            tracing::info!("Lead {} atualizado (posição {})", lead.id, index);
            Ok(lead.clone())
        }
    }
}
