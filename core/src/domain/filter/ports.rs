use crate::domain::{
    catalog::entities::Resource,
    common::entities::app_errors::CoreError,
    filter::value_objects::{
        CompileFilterInput, CompiledFilter, FieldView, GetOperatorsInput, OperatorView,
        RestoreFilterInput, RestoredFilter,
    },
};

#[cfg_attr(test, mockall::automock)]
pub trait FilterService: Send + Sync {
    fn get_fields(
        &self,
        resource: Resource,
    ) -> impl Future<Output = Result<Vec<FieldView>, CoreError>> + Send;

    fn compile_filter(
        &self,
        input: CompileFilterInput,
    ) -> impl Future<Output = Result<CompiledFilter, CoreError>> + Send;

    fn restore_filter(
        &self,
        input: RestoreFilterInput,
    ) -> impl Future<Output = Result<RestoredFilter, CoreError>> + Send;

    fn get_operators(
        &self,
        input: GetOperatorsInput,
    ) -> impl Future<Output = Result<Vec<OperatorView>, CoreError>> + Send;
}
