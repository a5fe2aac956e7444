use rust_decimal::Decimal;
use thiserror::Error;

use crate::types::TransactionCategory;

/// Erros possíveis durante o parsing de faturas de cartão de crédito
#[derive(Error, Debug)]
pub enum StatementParseError {
    /// Uma transação precisou de data antes do cabeçalho do ciclo de faturamento
    #[error("Failed to determine billing cycle dates")]
    BillingCycleUndetermined,

    /// A soma calculada de uma categoria não bate com o total impresso na fatura
    #[error(
        "Calculated {category} total mismatch: {actual:.2} != {}",
        display_expected(.expected)
    )]
    Reconciliation {
        category: TransactionCategory,
        /// `None` quando o bloco de resumo nunca foi encontrado
        expected: Option<Decimal>,
        actual: Decimal,
    },

    /// O mesmo id aparece duas vezes na mesma categoria
    #[error("Duplicate {category} transaction id: {id}")]
    DuplicateTransactionId {
        category: TransactionCategory,
        id: u32,
    },

    // ── Erros de tokens individuais ─────────────────────────────────────────────

    /// Valor monetário que casou com o padrão mas não pôde ser convertido
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Dia/mês que não formam uma data de calendário válida
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    // ── Erros de configuração e do builder ──────────────────────────────────────

    /// Configuração do parser inválida (JSON malformado, rótulos vazios, etc.)
    #[error("Invalid parser configuration: {0}")]
    InvalidConfig(String),

    /// Padrão derivado da configuração não compila
    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Layout da fatura não é suportado pela biblioteca
    #[error("Unsupported statement format")]
    UnsupportedFormat,

    /// Erro ao ler o conteúdo do arquivo do disco
    #[error("Failed to read file content: {0}")]
    ReadContentFailed(#[from] std::io::Error),

    /// O builder foi chamado sem fornecer conteúdo, páginas nem caminho de arquivo
    #[error("Content or filepath is required")]
    MissingContentAndFilepath,
}

fn display_expected(expected: &Option<Decimal>) -> String {
    match expected {
        Some(total) => format!("{:.2}", total),
        None => "missing summary".to_string(),
    }
}

/// Alias conveniente para Result com nosso tipo de erro principal
pub type StatementResult<T> = Result<T, StatementParseError>;
